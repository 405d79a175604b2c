use std::fs;

use padmap::controller::{DeviceManifest, Guid, PhysicalDevice};
use padmap::mapping::{
    AxisSign, ConfigurationManager, ControllerDatabase, InputKey, LegacyJoystickEncoder,
    MappingError, Normalizer, RawControlDescriptor, StructuredEncoder, TargetEncoder, TargetType,
    TranslationTables,
};
use padmap::persistence::{Artifact, IniDocument, OutputFormat};

const XBOX_GUID: &str = "030000005e0400008e02000000007801";
const XBOX_LINE: &str = "030000005e0400008e02000000007801,Xbox 360 Controller,a:b0,b:b1,x:b2,y:b3,back:b6,start:b7,leftshoulder:b4,rightshoulder:b5,leftstick:b9,rightstick:b10,leftx:a0,lefty:a1,lefttrigger:a2,rightx:a3,righty:a4,righttrigger:a5,dpup:h0.1,dpright:h0.2,dpdown:h0.4,dpleft:h0.8,platform:Linux,";

fn xbox(player: u32) -> PhysicalDevice {
    PhysicalDevice::gamepad(
        Guid::parse(XBOX_GUID).unwrap(),
        player,
        player - 1,
        format!("Xbox {player}"),
    )
}

fn database_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("gamecontrollerdb.txt");
    fs::write(&path, format!("# Linux\n{XBOX_LINE}\n")).unwrap();
    path
}

#[test]
fn xbox_pad_resolves_from_database() {
    let dir = tempfile::tempdir().unwrap();
    let database = ControllerDatabase::load(database_file(&dir)).unwrap();
    let tables = TranslationTables::standard();
    let normalizer = Normalizer::new(
        &tables,
        Some(&database),
        StructuredEncoder::default().capabilities(),
    );
    let device = xbox(1);

    assert_eq!(
        normalizer.resolve(&device, InputKey::A),
        RawControlDescriptor::Button { id: 0 }
    );
    assert_eq!(
        normalizer.resolve(&device, InputKey::Up),
        RawControlDescriptor::Hat { id: 0, bit: 1 }
    );
    assert_eq!(
        normalizer.resolve(&device, InputKey::LeftAnalogLeft),
        RawControlDescriptor::Axis {
            id: 0,
            sign: AxisSign::Negative
        }
    );
    assert_eq!(
        normalizer.resolve(&device, InputKey::LeftAnalogRight),
        RawControlDescriptor::Axis {
            id: 0,
            sign: AxisSign::Positive
        }
    );
}

#[test]
fn five_devices_for_a_four_player_target() {
    let dir = tempfile::tempdir().unwrap();
    let manager =
        ConfigurationManager::new(TranslationTables::standard(), Some(database_file(&dir)));
    let devices: Vec<_> = [3, 1, 5, 2, 4].into_iter().map(xbox).collect();
    let mut doc = IniDocument::default();

    let report = manager.configure(&devices, &StructuredEncoder::default(), &mut doc);

    assert_eq!(report.written, vec![1, 2, 3, 4]);
    assert_eq!(report.dropped, vec![5]);
    assert!(report.issues.iter().any(|e| matches!(
        e,
        MappingError::TargetCapExceeded {
            player_index: 5,
            ..
        }
    )));
    assert_eq!(doc.get("Pad1", "Device"), Some("SDL/0/Xbox 1"));
    assert_eq!(doc.get("Pad4", "Buttons/A"), Some("`Button 0`"));
    assert!(!doc.has_section("Pad5"));
}

#[test]
fn missing_database_leaves_everything_unbound() {
    let dir = tempfile::tempdir().unwrap();
    let manager = ConfigurationManager::new(
        TranslationTables::standard(),
        Some(dir.path().join("absent.txt")),
    );
    let mut doc = IniDocument::default();

    let report = manager.configure(&[xbox(1)], &LegacyJoystickEncoder::default(), &mut doc);

    assert_eq!(report.written, vec![1]);
    assert!(matches!(
        report.issues.first(),
        Some(MappingError::DatabaseUnavailable { .. })
    ));
    for key in InputKey::ALL {
        assert_eq!(doc.get("joystick1", key.name()), Some("0"));
    }
}

#[test]
fn manifest_devices_through_every_target() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("devices.toml");
    fs::write(
        &manifest,
        format!(
            r#"
[[device]]
guid = "{XBOX_GUID}"
vendor_id = 0x045e
product_id = 0x028e
xinput = true
player = 1
name = "Xbox 360 Controller"

[device.capture]
a = "b1"

[[device]]
keyboard = true
player = 2
name = "Keyboard"

[device.capture]
a = "k120"
"#
        ),
    )
    .unwrap();
    let devices = DeviceManifest::load(&manifest).unwrap().into_devices();
    let manager =
        ConfigurationManager::new(TranslationTables::standard(), Some(database_file(&dir)));

    for target in TargetType::ALL {
        let encoder = target.create_encoder();
        let mut artifact = Artifact::open(encoder.output_format(), None).unwrap();
        let report = manager.configure(&devices, encoder.as_ref(), artifact.sink());
        assert_eq!(report.written, vec![1, 2], "{target}");
        assert!(!artifact.render().is_empty(), "{target}");
    }
}

#[test]
fn capture_overrides_database_in_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out/legacy.ini");
    let manager =
        ConfigurationManager::new(TranslationTables::standard(), Some(database_file(&dir)));
    let device = xbox(1).with_capture(InputKey::A, RawControlDescriptor::Button { id: 5 });

    let mut artifact = Artifact::open(OutputFormat::Ini, Some(output.as_path())).unwrap();
    manager.configure(&[device], &LegacyJoystickEncoder::default(), artifact.sink());
    artifact.write_to(&output).unwrap();

    let doc = IniDocument::load(&output).unwrap();
    assert_eq!(doc.get("joystick1", "a"), Some("6"));
    assert_eq!(doc.get("joystick1", "b"), Some("2"));
}

#[test]
fn xinput_pad_through_legacy_codes() {
    let dir = tempfile::tempdir().unwrap();
    let manager =
        ConfigurationManager::new(TranslationTables::standard(), Some(database_file(&dir)));
    let device = xbox(1).with_xinput(true);
    let mut doc = IniDocument::default();

    manager.configure(&[device], &LegacyJoystickEncoder::default(), &mut doc);

    // both triggers share axis 2, one half each
    assert_eq!(doc.get("joystick1", "l2"), Some("768"));
    assert_eq!(doc.get("joystick1", "r2"), Some("-768"));
    assert_eq!(doc.get("joystick1", "rightanalogup"), Some("-1280"));
    assert_eq!(doc.get("joystick1", "rightanalogdown"), Some("1280"));
    assert_eq!(doc.get("joystick1", "rightanalogleft"), Some("-1024"));
    assert_eq!(doc.get("joystick1", "rightanalogright"), Some("1024"));
}
