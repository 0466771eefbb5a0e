use std::fmt;

pub const REFERENCE_SEQUENCE: &str = "hl2_ref";
pub const DELTA_ANIMATION: &str = "a_proportions";
pub const DELTA_SEQUENCE: &str = "proportions";
pub const RAGDOLL_SEQUENCE: &str = "ragdoll";
pub const RAGDOLL_ACTIVITY: &str = "ACT_DIERAGDOLL";

/// QC block that subtracts the reference SMD from the proportions SMD and
/// plays the result as an always-on additive layer.
///
/// Paths are written as given, relative to the QC.
#[derive(Debug, Clone, Copy)]
pub struct CorrectiveSnippet<'a> {
    pub reference_path: &'a str,
    pub proportions_path: &'a str,
    /// Adds a reminder that `$ikchain` lines must come before the block
    pub has_ik_chains: bool,
}

impl fmt::Display for CorrectiveSnippet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// -- Corrective Proportion Trick (CaptainBigButt method) --")?;
        writeln!(f, "// Paste this AFTER your $sequence \"reference\" line.")?;
        writeln!(f, "//")?;
        writeln!(f, "// hl2_female_reference.smd = HL2 skeleton with model rotations")?;
        writeln!(f, "// proportions.smd         = model skeleton (core biped only)")?;
        writeln!(f, "// The delta = model positions - HL2 positions (zero rotation).")?;
        writeln!(f, "//")?;

        writeln!(f)?;
        writeln!(
            f,
            "$sequence {REFERENCE_SEQUENCE} \"{}\" fps 1 hidden",
            self.reference_path
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "$animation {DELTA_ANIMATION} \"{}\" subtract {REFERENCE_SEQUENCE} 0",
            self.proportions_path
        )?;
        writeln!(f)?;
        writeln!(f, "$sequence {DELTA_SEQUENCE} {DELTA_ANIMATION} delta autoplay")?;
        if self.has_ik_chains {
            writeln!(f)?;
            writeln!(f, "// $ikchain detected -- make sure these are defined before this block:")?;
            writeln!(f, "//   $ikchain \"rhand\" \"ValveBiped.Bip01_R_Hand\" ...")?;
            writeln!(f, "//   $ikchain \"lhand\" \"ValveBiped.Bip01_L_Hand\" ...")?;
            writeln!(f, "//   $ikchain \"rfoot\" \"ValveBiped.Bip01_R_Foot\" ...")?;
            writeln!(f, "//   $ikchain \"lfoot\" \"ValveBiped.Bip01_L_Foot\" ...")?;
            writeln!(f, "//   $ikautoplaylock \"rfoot\" 0.5 0.1")?;
            writeln!(f, "//   $ikautoplaylock \"lfoot\" 0.5 0.1")?;
        }
        writeln!(f)?;
        writeln!(f, "$Sequence \"{RAGDOLL_SEQUENCE}\" {{")?;
        writeln!(f, "\t\"{}\"", self.reference_path)?;
        writeln!(f, "\tactivity \"{RAGDOLL_ACTIVITY}\" 1")?;
        writeln!(f, "\tfadein 0.2")?;
        writeln!(f, "\tfadeout 0.2")?;
        writeln!(f, "\tfps 30")?;
        writeln!(f, "}}")
    }
}

pub fn write_snippet(reference_path: &str, proportions_path: &str, has_ik_chains: bool) -> String {
    CorrectiveSnippet {
        reference_path,
        proportions_path,
        has_ik_chains,
    }
    .to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    const REF: &str = "anims/hl2_female_reference.smd";
    const PROP: &str = "anims/proportions.smd";

    #[test]
    fn test_directives_in_order() {
        let snippet = write_snippet(REF, PROP, false);
        let directives: Vec<&str> = snippet
            .lines()
            .filter(|line| !line.is_empty() && !line.starts_with("//"))
            .collect();

        assert_eq!(
            directives,
            [
                "$sequence hl2_ref \"anims/hl2_female_reference.smd\" fps 1 hidden",
                "$animation a_proportions \"anims/proportions.smd\" subtract hl2_ref 0",
                "$sequence proportions a_proportions delta autoplay",
                "$Sequence \"ragdoll\" {",
                "\t\"anims/hl2_female_reference.smd\"",
                "\tactivity \"ACT_DIERAGDOLL\" 1",
                "\tfadein 0.2",
                "\tfadeout 0.2",
                "\tfps 30",
                "}",
            ]
        );
        assert!(!snippet.contains("$ikchain detected"));
        assert!(snippet.ends_with("}\n"));
    }

    #[test]
    fn test_ik_advisory_between_delta_and_ragdoll() {
        let snippet = write_snippet(REF, PROP, true);
        let autoplay = snippet.find("delta autoplay").unwrap();
        let advisory = snippet.find("// $ikchain detected").unwrap();
        let ragdoll = snippet.find("$Sequence \"ragdoll\"").unwrap();
        assert!(autoplay < advisory);
        assert!(advisory < ragdoll);
        assert!(snippet.contains("autoplay\n\n// $ikchain detected"));
        assert!(snippet.contains("//   $ikautoplaylock \"lfoot\" 0.5 0.1\n\n$Sequence \"ragdoll\" {\n"));
    }

    #[test]
    fn test_blank_line_before_each_directive() {
        let snippet = write_snippet(REF, PROP, false);
        assert!(snippet.contains("//\n\n$sequence hl2_ref"));
        assert!(snippet.contains("hidden\n\n$animation"));
        assert!(snippet.contains("hl2_ref 0\n\n$sequence proportions"));
        assert!(snippet.contains("autoplay\n\n$Sequence \"ragdoll\" {\n"));
    }
}
