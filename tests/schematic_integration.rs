//! End-to-end resolution of a schematic against on-disk libraries.

use eagle_parts::eagle::{
    find_part, EagleError, EagleVersion, Installation, LibraryResolver, OfflineFetcher, Schematic,
    StaticInstallations, DEFAULT_REMOTE_URL,
};
use tempfile::TempDir;

const LAYOUT_SCH: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE eagle SYSTEM "eagle.dtd">
<eagle version="6.2">
  <drawing>
    <layers>
      <layer number="91" name="Nets" color="2" fill="1" visible="yes" active="yes"/>
    </layers>
    <schematic>
      <libraries/>
      <parts>
        <part name="R1" library="rcl" deviceset="R-US_" device="0204/2V" value="10k"/>
        <part name="R2" library="rcl" deviceset="R-US_" device="0204/2V"/>
        <part name="U1" library="SparkFun-Boards" deviceset="ARDUINO-MEGA" device="FULL"/>
      </parts>
      <sheets>
        <sheet>
          <instances>
            <instance part="R1" gate="G$1" x="5.08" y="0"/>
          </instances>
        </sheet>
      </sheets>
    </schematic>
  </drawing>
</eagle>"#;

const RCL_LBR: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE eagle SYSTEM "eagle.dtd">
<eagle version="6.2">
  <drawing>
    <library>
      <symbols>
        <symbol name="R-US">
          <pin name="1" x="-5.08" y="0" visible="off" length="short" direction="pas" swaplevel="1"/>
          <pin name="2" x="5.08" y="0" visible="off" length="short" direction="pas" swaplevel="1" rot="R180"/>
        </symbol>
      </symbols>
      <devicesets>
        <deviceset name="R-US_" prefix="R" uservalue="yes">
          <gates>
            <gate name="G$1" symbol="R-US" x="0" y="0"/>
          </gates>
        </deviceset>
      </devicesets>
    </library>
  </drawing>
</eagle>"#;

const BOARDS_LBR: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<eagle version="6.2">
  <drawing>
    <library>
      <symbols>
        <symbol name="ARDUINO-MEGA-FULL">
          <pin name="D0/RX" x="-20.32" y="12.7" length="short"/>
          <pin name="D1/TX" x="-20.32" y="10.16" length="short"/>
          <pin name="GND" x="20.32" y="-12.7" length="short" rot="R180"/>
        </symbol>
      </symbols>
      <devicesets>
        <deviceset name="ARDUINO-MEGA">
          <gates>
            <gate name="G$1" symbol="ARDUINO-MEGA-FULL" x="0" y="0"/>
          </gates>
        </deviceset>
      </devicesets>
    </library>
  </drawing>
</eagle>"#;

/// One installation (6.2) with the given libraries.
fn setup(libraries: &[(&str, &str)]) -> (TempDir, LibraryResolver) {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let lbr = tmp.path().join("lbr");
    std::fs::create_dir(&lbr).expect("Failed to create lbr dir");
    for (name, body) in libraries {
        std::fs::write(lbr.join(format!("{name}.lbr")), body).expect("Failed to write library");
    }
    let resolver = LibraryResolver::new(
        StaticInstallations(vec![Installation::new(EagleVersion::new(6, 2, 0), &lbr)]),
        OfflineFetcher,
        DEFAULT_REMOTE_URL,
    );
    (tmp, resolver)
}

#[test]
fn finds_arduino_and_its_pins() {
    let (_tmp, mut resolver) = setup(&[("rcl", RCL_LBR), ("SparkFun-Boards", BOARDS_LBR)]);
    let schematic = Schematic::parse(LAYOUT_SCH).expect("schematic parses");

    let parts = schematic
        .resolve_parts(&mut resolver, None)
        .expect("all parts resolve");
    assert_eq!(parts.len(), 3);
    // R1 and R2 share one load of rcl.lbr
    assert_eq!(resolver.cached(), 2);

    let arduino = find_part(&parts, "ARDUINO-MEGA", "FULL").expect("arduino present");
    assert_eq!(arduino.name(), "U1");
    assert_eq!(arduino.value(), "");
    let pins: Vec<_> = arduino.pins().iter().map(|p| p.name()).collect();
    assert_eq!(pins, ["D0/RX", "D1/TX", "GND"]);

    let gnd = arduino.pin("GND").expect("GND pin");
    assert_eq!((gnd.x(), gnd.y()), ("20.32", "-12.7"));
    let pos = gnd.position().expect("numeric");
    assert!((pos.x - 20.32).abs() < 1e-9);

    let r1 = &parts[0];
    assert_eq!(r1.value(), "10k");
    assert_eq!(parts[1].value(), "");
}

#[test]
fn missing_library_aborts_strict_resolution() {
    let (_tmp, mut resolver) = setup(&[("rcl", RCL_LBR)]);
    let schematic = Schematic::parse(LAYOUT_SCH).unwrap();

    let err = schematic.resolve_parts(&mut resolver, None).unwrap_err();
    assert!(
        matches!(err, EagleError::LibraryNotFound { ref name, .. } if name == "SparkFun-Boards"),
        "unexpected error: {err}"
    );
}

#[test]
fn lenient_resolution_reports_failures() {
    let (_tmp, mut resolver) = setup(&[("rcl", RCL_LBR)]);
    let schematic = Schematic::parse(LAYOUT_SCH).unwrap();

    let (parts, failures) = schematic.resolve_parts_lenient(&mut resolver, None);
    let names: Vec<_> = parts.iter().map(|p| p.name()).collect();
    assert_eq!(names, ["R1", "R2"]);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "U1");
    assert!(matches!(failures[0].1, EagleError::LibraryNotFound { .. }));
}

#[test]
fn open_reads_from_disk() {
    let (tmp, mut resolver) = setup(&[("rcl", RCL_LBR), ("SparkFun-Boards", BOARDS_LBR)]);
    let path = tmp.path().join("Layout.sch");
    std::fs::write(&path, LAYOUT_SCH).unwrap();

    let schematic = Schematic::open(&path).expect("schematic opens");
    assert_eq!(schematic.version(), Some(&EagleVersion::new(6, 2, 0)));

    let override_version = EagleVersion::new(9, 6, 2);
    let parts = schematic
        .resolve_parts(&mut resolver, Some(&override_version))
        .expect("older installation used as fallback");
    assert_eq!(parts.len(), 3);
}
