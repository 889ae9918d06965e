// ── iControl REST resource paths ──
//
// Identifiers are spliced in verbatim. Pool members are addressed as
// `~<partition>~<member>`, the device's partition-qualified name form.

/// Device-cluster management (config-sync runs here).
pub const CONFIG_SYNC: &str = "/mgmt/tm/cm";

/// UCS archive collection.
pub const UCS: &str = "/mgmt/tm/sys/ucs";

pub fn node(node_name: &str) -> String {
    format!("/mgmt/tm/ltm/node/{node_name}")
}

pub fn pool_member(pool_name: &str, partition_name: &str, member_name: &str) -> String {
    format!("/mgmt/tm/ltm/pool/{pool_name}/members/~{partition_name}~{member_name}")
}

pub fn auth_user(user_name: &str) -> String {
    format!("/mgmt/tm/auth/user/{user_name}")
}

pub fn ucs_archive(file_name: &str) -> String {
    format!("{UCS}/{file_name}")
}
