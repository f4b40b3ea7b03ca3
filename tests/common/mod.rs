//! Shared fixture: three small repositories checked out side by side.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn mkdir(root: &Path, rel: &str) {
    fs::create_dir_all(root.join(rel)).unwrap();
}

/// Builds a working path with deliberate drift:
///
/// - `kernel/panic` is consistent everywhere.
/// - `osp/nova_conf` has no content (ERR11).
/// - `networking/bond_mode` content misses `BOND_B` and adds `BOND_C`
///   (ERR14, ERR15); its playbook is filed under `bonding` (ERR23) and
///   lacks `BOND_C` (ERR24).
/// - `satellite/sat_upgrade` playbook targets another role (ERR26).
/// - `storage/old_disk` exists only in content (ERR12, ERR21).
/// - `security/cve_check` exists only in content and is screened.
/// - `kernel/retired` exists only as a legacy playbook (ERR22).
pub fn drifted_repos() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let wp = tmp.path();
    let plugins = "insights-plugins/telemetry/rules/plugins";
    let content = "insights-content/content";
    let playbooks = "insights-playbooks/playbooks";

    write(wp, &format!("{plugins}/__init__.py"), "");
    write(wp, &format!("{plugins}/kernel/__init__.py"), "");
    write(wp, &format!("{plugins}/kernel/panic.py"), "ERROR_KEY = \"PANIC\"\n");
    write(wp, &format!("{plugins}/osp/nova_conf.py"), "ERROR_KEY = 'NOVA'\n");
    write(
        wp,
        &format!("{plugins}/networking/bond_mode.py"),
        "ERROR_KEY_A = \"BOND_A\"\nERROR_KEY_B = \"BOND_B\"  # legacy\n",
    );
    write(wp, &format!("{plugins}/satellite/sat_upgrade.py"), "ERROR_KEY = 'MISSED'\n");
    write(wp, &format!("{plugins}/util/helpers.py"), "ERROR_KEY = 'UTIL'\n");

    write(wp, &format!("{content}/kernel/panic/PANIC/metadata.yaml"), "role: controller\n");
    write(wp, &format!("{content}/kernel/panic/plugin.yaml"), "product_code: osp\n");
    write(wp, &format!("{content}/networking/bond_mode/BOND_A/metadata.yaml"), "");
    write(wp, &format!("{content}/networking/bond_mode/BOND_C/metadata.yaml"), "");
    mkdir(wp, &format!("{content}/networking/bond_mode/BOND_A/rhel_host"));
    write(
        wp,
        &format!("{content}/satellite/sat_upgrade/MISSED/metadata.yaml"),
        "product_code: sat\nrole: role\n",
    );
    write(wp, &format!("{content}/storage/old_disk/DISK/metadata.yaml"), "");
    write(wp, &format!("{content}/security/cve/cve_check/CVE/metadata.yaml"), "");

    write(wp, &format!("{playbooks}/kernel/panic/PANIC/README.md"), "legacy");
    mkdir(wp, &format!("{playbooks}/bonding/bond_mode/BOND_A/rhel_host"));
    mkdir(wp, &format!("{playbooks}/satellite/sat_upgrade/MISSED/osp_controller"));
    mkdir(wp, &format!("{playbooks}/kernel/retired/OLD"));

    tmp
}
