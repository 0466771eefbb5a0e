use glam::DVec3;

use super::*;
use crate::{FlatNode, HL2_FEMALE_QC};

const PELVIS_MODEL: &str = r#"$definebone "ValveBiped.Bip01_Pelvis" "" 0 0 37.9 0 0 90"#;
const PELVIS_REFERENCE: &str = r#"$definebone "ValveBiped.Bip01_Pelvis" "" 0 0 38.5 0 0 89.999982"#;

/// HL2 skeleton stretched vertically, with a couple of custom bones and an
/// IK chain declaration around it.
fn tall_model_qc() -> String {
    let mut qc = String::from("$modelname \"player/tall.mdl\"\n$cdmaterials \"models/tall\"\n");
    for bone in parse_definebones(HL2_FEMALE_QC).iter() {
        let p = bone.position;
        let r = bone.rotation;
        qc.push_str(&format!(
            "$definebone \"{}\" \"{}\" {} {} {} {} {} {}\n",
            bone.name,
            bone.parent,
            p.x,
            p.y,
            p.z * 1.1,
            r.x + 1.0,
            r.y,
            r.z
        ));
    }
    qc.push_str("$definebone \"Hair01\" \"ValveBiped.Bip01_Head1\" 1 0 0 0 0 0\n");
    qc.push_str("$definebone \"Hair02\" \"Hair01\" 1 0 0 0 0 0\n");
    qc.push_str("$ikchain \"rhand\" \"ValveBiped.Bip01_R_Hand\" knee 0.707 0.707 0\n");
    qc
}

fn bits(value: DVec3) -> [u64; 3] {
    value.to_array().map(f64::to_bits)
}

#[test]
fn test_pelvis_scenario() {
    let reference = parse_definebones(PELVIS_REFERENCE);
    let generator = ProportionGenerator::with_reference(&reference, Default::default());
    let files = generator.generate("pelvis", PELVIS_MODEL).unwrap();

    assert_eq!(
        files.skeleton.nodes,
        [FlatNode {
            index: 0,
            name: "ValveBiped.Bip01_Pelvis".to_owned(),
            parent_index: -1,
        }]
    );

    let pair = &files.pose_pairs[0];
    assert_eq!(bits(pair.proportions.rotation), bits(pair.reference.rotation));
    assert!(pair.delta().abs_diff_eq(DVec3::new(0.0, 0.0, -0.6), 1e-9));

    assert!(files
        .proportions_smd
        .contains("  0  0.000000 0.000000 37.900000  1.570796 0.000000 0.000000\n"));
    assert!(files
        .reference_smd
        .contains("  0  0.000000 0.000000 38.500000  1.570796 0.000000 0.000000\n"));
}

#[test]
fn test_no_input_bones() {
    let generator = ProportionGenerator::default();
    let text = "$modelname \"player/empty.mdl\"\n$body \"body\" \"ref.smd\"\n";

    assert_eq!(
        generator.generate("empty", text).unwrap_err(),
        GeneratorError::NoInputBones
    );
    assert_eq!(
        generator.analyze("empty", text).unwrap_err(),
        GeneratorError::NoInputBones
    );
}

#[test]
fn test_no_matched_bones() {
    let text = r#"
$definebone "root" "" 0 0 0 0 0 0
$definebone "spine_01" "root" 0 0 10 0 0 0
$definebone "head" "spine_01" 0 0 20 0 0 0
"#;
    let generator = ProportionGenerator::default();
    assert_eq!(
        generator.generate("robot", text).unwrap_err(),
        GeneratorError::NoMatchedBones
    );

    let analysis = generator.analyze("robot", text).unwrap();
    assert!(!analysis.is_compatible());
    assert_eq!(analysis.total_bones, 3);
    assert_eq!(analysis.custom_bones, ["root", "spine_01", "head"]);
}

#[test]
fn test_full_model() {
    let qc = tall_model_qc();
    let generator = ProportionGenerator::default();
    let files = generator.generate("tall", &qc).unwrap();

    assert_eq!(files.bone_count(), 53);
    assert_eq!(files.analysis.total_bones, 72);
    assert_eq!(files.analysis.matched_count(), 53);
    assert_eq!(files.analysis.custom_count(), 19);
    assert!(files.analysis.custom_bones.contains(&"Hair02".to_owned()));
    assert!(files.analysis.has_ik_chains);
    assert!(files.snippet.contains("// $ikchain detected"));
    assert!(files
        .snippet
        .contains("$sequence hl2_ref \"anims/hl2_female_reference.smd\" fps 1 hidden"));

    for pair in &files.pose_pairs {
        assert_eq!(bits(pair.proportions.rotation), bits(pair.reference.rotation));
        let reference = hl2_female_reference().get(&pair.node.name).unwrap();
        assert_eq!(pair.reference.position, reference.position);
    }

    // Rotation columns are identical line for line
    let rotations = |smd: &str| -> Vec<String> {
        smd.lines()
            .skip_while(|line| *line != "time 0")
            .skip(1)
            .take_while(|line| *line != "end")
            .map(|line| line.split("  ").last().unwrap_or_default().to_owned())
            .collect()
    };
    assert_eq!(rotations(&files.proportions_smd), rotations(&files.reference_smd));
    assert_ne!(files.proportions_smd, files.reference_smd);
}

#[test]
fn test_matched_order_follows_model() {
    let text = r#"
$definebone "ValveBiped.Bip01_Pelvis" "" 0 0 37 0 0 90
$definebone "ValveBiped.Bip01_L_Thigh" "ValveBiped.Bip01_Pelvis" 4 0 0 0 0 0
$definebone "ValveBiped.Bip01_Spine" "ValveBiped.Bip01_Pelvis" 0 4 -1.6 0 90 90
$definebone "ValveBiped.Bip01_R_Thigh" "ValveBiped.Bip01_Pelvis" -4 0 0 0 0 0
"#;
    let files = ProportionGenerator::default().generate("order", text).unwrap();
    let names: Vec<_> = files.skeleton.iter().map(|node| node.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "ValveBiped.Bip01_Pelvis",
            "ValveBiped.Bip01_L_Thigh",
            "ValveBiped.Bip01_Spine",
            "ValveBiped.Bip01_R_Thigh",
        ]
    );
    assert_eq!(files.analysis.matched_bones, names);
}

#[test]
fn test_flattens_over_reference_hierarchy() {
    // Spine1 and Spine2 are absent, so Spine4 hangs from Spine in the output
    let text = r#"
$definebone "ValveBiped.Bip01_Pelvis" "" 0 0 37 0 0 90
$definebone "ValveBiped.Bip01_Spine" "ValveBiped.Bip01_Pelvis" 0 4 -1.6 0 90 90
$definebone "ValveBiped.Bip01_Spine4" "ValveBiped.Bip01_Spine" 15 0 0 0 0 0
$definebone "ValveBiped.Bip01_Neck1" "ValveBiped.Bip01_Spine4" 3 0 0 0 0 0
"#;
    let files = ProportionGenerator::default().generate("short", text).unwrap();
    assert!(files
        .proportions_smd
        .starts_with(
            "version 1\nnodes\n  0 \"ValveBiped.Bip01_Pelvis\" -1\n  1 \"ValveBiped.Bip01_Spine\" 0\n  2 \"ValveBiped.Bip01_Spine4\" 1\n  3 \"ValveBiped.Bip01_Neck1\" 2\nend\n"
        ));
}

#[test]
fn test_case_insensitive_names() {
    let text = r#"
$definebone "valvebiped.bip01_pelvis" "" 0 0 37 0 0 90
$definebone "VALVEBIPED.BIP01_SPINE" "valvebiped.bip01_pelvis" 0 4 -1.6 0 90 90
"#;
    let files = ProportionGenerator::default().generate("lower", text).unwrap();
    assert_eq!(files.bone_count(), 2);
    assert_eq!(files.skeleton.nodes[1].parent_index, 0);
    assert!(files.proportions_smd.contains("  0 \"valvebiped.bip01_pelvis\" -1\n"));
}

#[test]
fn test_idempotent() {
    let qc = tall_model_qc();
    let generator = ProportionGenerator::default();
    let first = generator.generate("tall", &qc).unwrap();
    let second = generator.generate("tall", &qc).unwrap();

    assert_eq!(first.proportions_smd, second.proportions_smd);
    assert_eq!(first.reference_smd, second.reference_smd);
    assert_eq!(first.snippet, second.snippet);
}

#[test]
fn test_custom_settings_paths() {
    let settings = GeneratorSettings {
        anims_subfolder: "anims/fix".to_owned(),
        ..Default::default()
    };
    let files = ProportionGenerator::new(settings)
        .generate("pelvis", PELVIS_MODEL)
        .unwrap();
    assert_eq!(files.proportions_path, "anims/fix/proportions.smd");
    assert!(files
        .snippet
        .contains("$animation a_proportions \"anims/fix/proportions.smd\" subtract hl2_ref 0"));
    assert!(!files.analysis.has_ik_chains);
}

#[test]
fn test_custom_matcher() {
    let text = r#"
$definebone "Hips" "" 0 0 40 0 0 0
$definebone "Spine" "Hips" 0 0 5 0 0 0
"#;
    let reference = parse_definebones(
        r#"
$definebone "Hips" "" 0 0 38 0 0 0
$definebone "Spine" "Hips" 0 0 4 0 0 0
"#,
    );
    let generator = ProportionGenerator::with_reference(&reference, Default::default())
        .with_matcher(BoneMatcher::new(["hips", "spine"]));
    let files = generator.generate("mixamo", text).unwrap();
    let deltas: Vec<_> = files.pose_pairs.iter().map(PosePair::delta).collect();
    assert_eq!(deltas, [DVec3::new(0.0, 0.0, 2.0), DVec3::new(0.0, 0.0, 1.0)]);
}

#[test]
fn test_custom_bones_preview() {
    assert_eq!(custom_bones_preview(&["a", "b"]), "a, b");
    assert_eq!(
        custom_bones_preview(&["a", "b", "c", "d", "e", "f", "g", "h"]),
        "a, b, c, d, e, f ... +2 more"
    );
    assert_eq!(custom_bones_preview::<&str>(&[]), "");
}
