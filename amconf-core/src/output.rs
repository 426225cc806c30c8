//! Rendering a configure plan for humans or machines.

use std::io::Write;

use anyhow::Result;

use crate::context::ConfigurePlan;

/// Write the plan as prettified JSON.
pub fn write_plan_json(plan: &ConfigurePlan, mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    w.write_all(json.as_bytes())?;
    w.write_all(b"\n")?;
    Ok(())
}

/// Write the plan as one human-readable field per line.
pub fn write_plan_text(plan: &ConfigurePlan, mut w: impl Write) -> Result<()> {
    writeln!(
        w,
        "orchestrator: {} ({})",
        plan.orchestrator.path.display(),
        plan.orchestrator.version
    )?;
    writeln!(w, "platform:     {}", plan.platform)?;
    writeln!(w, "source path:  {}", plan.source_path.display())?;
    writeln!(w, "build folder: {}", plan.build_folder)?;
    writeln!(w, "invocation:   {}", plan.args.join(" "))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::Orchestrator;
    use crate::platform::TargetPlatform;
    use crate::version::ToolVersion;
    use std::path::PathBuf;

    fn sample_plan() -> ConfigurePlan {
        ConfigurePlan {
            orchestrator: Orchestrator {
                path: PathBuf::from("/usr/bin/ambuild"),
                version: ToolVersion::new(2, 2, 5),
            },
            platform: TargetPlatform::Linux,
            source_path: PathBuf::from("/src/project"),
            build_folder: "obj-linux".to_string(),
            args: vec![
                "configure".to_string(),
                "--source-path".to_string(),
                "/src/project".to_string(),
                "--build-folder".to_string(),
                "obj-linux".to_string(),
            ],
        }
    }

    #[test]
    fn json_rendering_carries_version_and_folder() {
        let mut buf = Vec::new();
        write_plan_json(&sample_plan(), &mut buf).expect("write json");

        let parsed: serde_json::Value = serde_json::from_slice(&buf).expect("parse");
        assert_eq!(parsed["orchestrator"]["version"], "2.2.5");
        assert_eq!(parsed["platform"], "linux");
        assert_eq!(parsed["build_folder"], "obj-linux");
        assert_eq!(parsed["args"][0], "configure");
    }

    #[test]
    fn text_rendering_is_line_per_field() {
        let mut buf = Vec::new();
        write_plan_text(&sample_plan(), &mut buf).expect("write text");

        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("build folder: obj-linux"));
        assert!(text.contains("--source-path /src/project"));
    }
}
