use amconf_core::version::ToolVersion;
use proptest::prelude::*;

proptest! {
    #[test]
    fn parses_prose_wrapped_versions(major in 0u32..1000, minor in 0u32..1000, patch in 0u32..10000) {
        let text = format!("AMBuild {major}.{minor}.{patch} (release)");
        let parsed = ToolVersion::parse(&text).expect("parse");
        prop_assert_eq!(parsed, ToolVersion::new(major, minor, patch));
    }

    #[test]
    fn ordering_matches_numeric_tuple_ordering(
        a in (0u32..100, 0u32..100, 0u32..100),
        b in (0u32..100, 0u32..100, 0u32..100),
    ) {
        let va = ToolVersion::new(a.0, a.1, a.2);
        let vb = ToolVersion::new(b.0, b.1, b.2);
        prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
    }
}

#[cfg(unix)]
mod probing {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    use amconf_core::version::{probe, ToolVersion};
    use tempfile::tempdir;

    #[test]
    fn probe_reads_the_version_a_tool_reports() {
        let tmp = tempdir().expect("tempdir");
        let tool = tmp.path().join("ambuild");
        fs::write(&tool, "#!/bin/sh\necho \"AMBuild 2.2.5\"\n").expect("write stub");
        let mut perms = fs::metadata(&tool).expect("metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&tool, perms).expect("chmod");

        let version = probe(&tool).expect("probe");
        assert_eq!(version, ToolVersion::new(2, 2, 5));
    }

    #[test]
    fn probe_reads_versions_printed_to_stderr() {
        let tmp = tempdir().expect("tempdir");
        let tool = tmp.path().join("ambuild");
        fs::write(&tool, "#!/bin/sh\necho \"AMBuild 2.1\" >&2\n").expect("write stub");
        let mut perms = fs::metadata(&tool).expect("metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&tool, perms).expect("chmod");

        let version = probe(&tool).expect("probe");
        assert_eq!(version, ToolVersion::new(2, 1, 0));
    }

    #[test]
    fn probe_fails_for_a_missing_binary() {
        let tmp = tempdir().expect("tempdir");
        assert!(probe(&tmp.path().join("ambuild")).is_err());
    }
}
