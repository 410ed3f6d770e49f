// End-to-end poll cycles against an in-memory offset area
use fsdata::{
    offsets, Address, BitField, FlightSession, FsDataError, FuelUnits, MemoryLogger,
    OffsetMemory, Position, RawOffsetSource, RawValue, Result, SessionConfig, Severity,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn session_with(config: SessionConfig) -> (FlightSession, MemoryLogger) {
    init_logging();
    let logger = MemoryLogger::new();
    let session = FlightSession::with_logger(config, Box::new(logger.clone()));
    (session, logger)
}

/// Simulator fully loaded: flap detents known, aircraft on the ground
fn loaded_memory() -> OffsetMemory {
    let mut mem = OffsetMemory::new();
    mem.write_i16(offsets::FLAPS_STEP, 4096).unwrap();
    mem.write_i16(offsets::ON_GROUND, 1).unwrap();
    mem
}

/// Standard and local-pressure altitude in feet, ground at sea level
fn set_altitude_ft(mem: &mut OffsetMemory, feet: f64) {
    let metres = feet / 3.28084;
    mem.write_f64(offsets::STANDARD_ALTITUDE, metres).unwrap();
    mem.write_i32(offsets::ALTITUDE_METRES, metres.round() as i32)
        .unwrap();
}

#[test]
fn test_unchanged_state_is_idempotent() {
    let mut mem = loaded_memory();
    mem.write_i16(offsets::PARKING_BRAKE, 32767).unwrap();
    mem.write_i16(offsets::ENGINE_COMBUSTION[0], 1).unwrap();
    let (mut session, logger) = session_with(SessionConfig::default());

    let first = session.poll_cycle(&mem);
    assert_eq!(first.entries_appended, 2);

    for _ in 0..5 {
        let report = session.poll_cycle(&mem);
        assert_eq!(report.entries_appended, 0);
        assert!(report.is_clean());
    }
    assert_eq!(
        session.flight_log().messages(),
        vec!["Parking Brake Set", "Engine 1 Started"]
    );
    assert!(logger.is_empty());
}

#[test]
fn test_one_entry_per_edge() {
    let mut mem = loaded_memory();
    let (mut session, _) = session_with(SessionConfig::default());

    for combustion in [1, 1, 0, 0, 1] {
        mem.write_i16(offsets::ENGINE_COMBUSTION[3], combustion).unwrap();
        session.poll_cycle(&mem);
    }

    assert_eq!(
        session.flight_log().messages(),
        vec!["Engine 4 Started", "Engine 4 Stopped", "Engine 4 Started"]
    );
}

#[test]
fn test_pause_gates_every_tracker() {
    let mut mem = loaded_memory();
    let (mut session, _) = session_with(SessionConfig::default());

    mem.write_i16(offsets::PAUSE, 1).unwrap();
    session.poll_cycle(&mem);

    // Changes while paused are not seen
    mem.write_i16(offsets::PARKING_BRAKE, 32767).unwrap();
    mem.write_u16(offsets::COM2, 0x2250).unwrap();
    let report = session.poll_cycle(&mem);
    assert!(report.paused);
    assert_eq!(report.entries_appended, 0);
    assert!(session.is_paused());

    mem.write_i16(offsets::PAUSE, 0).unwrap();
    session.poll_cycle(&mem);
    assert_eq!(
        session.flight_log().messages(),
        vec![
            "Simulator Paused",
            "Simulator Resumed",
            "Parking Brake Set",
            "COM2: 122.50"
        ]
    );
}

#[test]
fn test_gear_annotated_with_altitude() {
    // Local-pressure altitude is stored in whole metres, hence 3199
    let cases = [
        (3200.0, "Landing Gear DOWN at 3199AGL"),
        (9999.0, "Landing Gear DOWN at FL099"),
        (18000.0, "Landing Gear DOWN at FL180"),
    ];

    for (feet, expected) in cases {
        let mut mem = loaded_memory();
        set_altitude_ft(&mut mem, feet);
        mem.write_i32(offsets::GEAR_NOSE, 16383).unwrap();
        let (mut session, _) = session_with(SessionConfig::default());

        session.poll_cycle(&mem);
        assert_eq!(session.flight_log().messages(), vec![expected], "at {} ft", feet);
    }
}

#[test]
fn test_lights_in_flight() {
    let mut mem = loaded_memory();
    set_altitude_ft(&mut mem, 18000.0);
    let (mut session, _) = session_with(SessionConfig::default());

    // Landing and Strobe
    mem.write(offsets::LIGHTS, &RawValue::Bytes(vec![0b0001_0100, 0]))
        .unwrap();
    session.poll_cycle(&mem);

    assert_eq!(
        session.flight_log().messages(),
        vec!["Landing Lights ON at FL180", "Strobe Lights ON at FL180"]
    );
}

#[test]
fn test_transponder_suffixes() {
    let mut mem = loaded_memory();
    let (mut session, logger) = session_with(SessionConfig::default());

    for code in [0x1200, 0x7600, 0x2471] {
        mem.write_u16(offsets::TRANSPONDER, code).unwrap();
        session.poll_cycle(&mem);
    }
    // Not an octal code
    mem.write_u16(offsets::TRANSPONDER, 0x7800).unwrap();
    let report = session.poll_cycle(&mem);

    assert_eq!(
        session.flight_log().messages(),
        vec!["XPNDR: 1200 (VFR)", "XPNDR: 7600 (Emergency)", "XPNDR: 2471"]
    );
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].tracker, "XPNDR");
    assert!(matches!(
        report.failures[0].error,
        FsDataError::ClassificationFailure(_)
    ));
    assert_eq!(logger.count(Severity::Warning), 1);
    assert_eq!(session.trackers().transponder.code(), "2471");
}

#[test]
fn test_flap_zero_step_only_silent_on_first_poll() {
    let mut mem = OffsetMemory::new();
    mem.write_i16(offsets::ON_GROUND, 1).unwrap();
    let (mut session, logger) = session_with(SessionConfig::default());

    let first = session.poll_cycle(&mem);
    assert!(first.is_clean());
    assert!(logger.is_empty());

    let second = session.poll_cycle(&mem);
    assert_eq!(second.failures.len(), 1);
    assert_eq!(second.failures[0].tracker, "flaps");
    assert!(matches!(second.failures[0].error, FsDataError::DivideByZero(_)));
    assert_eq!(logger.count(Severity::Warning), 1);

    // Step populated: the detent is logged
    mem.write_i16(offsets::FLAPS_STEP, 4096).unwrap();
    mem.write_i32(offsets::FLAPS_POSITION, 4096 * 3).unwrap();
    let third = session.poll_cycle(&mem);
    assert!(third.is_clean());
    assert_eq!(session.flight_log().messages(), vec!["Flaps set to position 3"]);
}

#[test]
fn test_flap_zero_step_after_good_poll_is_silent() {
    let mut mem = loaded_memory();
    let (mut session, logger) = session_with(SessionConfig::default());
    assert!(session.poll_cycle(&mem).is_clean());

    // Simulator reloading: the detent step drops back to zero once
    mem.write_i16(offsets::FLAPS_STEP, 0).unwrap();
    let report = session.poll_cycle(&mem);
    assert!(report.is_clean());
    assert_eq!(logger.count(Severity::Warning), 0);

    let again = session.poll_cycle(&mem);
    assert_eq!(again.failures.len(), 1);
    assert_eq!(logger.count(Severity::Warning), 1);
}

#[test]
fn test_flap_zero_step_after_failed_read_is_silent() {
    let mut mem = OffsetMemory::new();
    mem.write_i16(offsets::ON_GROUND, 1).unwrap();
    let flaky = FlakySource {
        inner: mem,
        failing: offsets::FLAPS_POSITION,
    };
    let (mut session, logger) = session_with(SessionConfig::default());

    let first = session.poll_cycle(&flaky);
    assert_eq!(first.failures.len(), 1);
    assert_eq!(first.failures[0].tracker, "flaps");
    assert!(first.failures[0].error.is_read_failure());
    assert_eq!(logger.count(Severity::Warning), 1);

    let second = session.poll_cycle(&flaky.inner);
    assert!(second.is_clean());
    assert_eq!(logger.count(Severity::Warning), 1);
}

#[test]
fn test_fuel_in_kilograms() {
    let mut mem = loaded_memory();
    // 200 gallons at 6.7 lbs per gallon in the center tank
    mem.write_i16(offsets::FUEL_WEIGHT, (6.7_f64 * 256.0) as i16).unwrap();
    mem.write_i32(offsets::FUEL_TANKS[0].level, 128 * 65536).unwrap();
    mem.write_i32(offsets::FUEL_TANKS[0].capacity, 200).unwrap();
    let (mut session, _) = session_with(SessionConfig::new().with_fuel_units(FuelUnits::Kgs));

    // 1715 / 256 * 200 = 1339.84 lbs, 607.74 kg
    assert_eq!(session.current_fuel(&mem), Some(608));
    assert_eq!(session.current_fuel_label(&mem).as_deref(), Some("608kgs"));

    assert_eq!(session.mark_fuel_start(&mem), Some(608));
    mem.write_i32(offsets::FUEL_TANKS[0].level, 64 * 65536).unwrap();
    // 669.92 lbs, 303.87 kg
    assert_eq!(session.fuel_used(&mem), Some(608 - 304));

    // Fuel never reaches the flight log
    session.poll_cycle(&mem);
    assert!(session.flight_log().is_empty());
}

#[test]
fn test_position_formatting() {
    let mut mem = OffsetMemory::new();
    let raw_latitude = (-33.5 * 4.295_718_915_276_8e16 / 90.0) as i64;
    let raw_longitude = (151.175 * 1.844_674_407_370_96e19 / 360.0) as i64;
    mem.write_i64(offsets::LATITUDE, raw_latitude).unwrap();
    mem.write_i64(offsets::LONGITUDE, raw_longitude).unwrap();

    assert_eq!(Position::latitude(&mem).unwrap(), "33° 30' 0\" S");
    assert_eq!(Position::longitude(&mem).unwrap(), "151° 10' 30\" E");
}

#[test]
fn test_reset_emits_nothing() {
    let mut mem = loaded_memory();
    mem.write_i16(offsets::PARKING_BRAKE, 32767).unwrap();
    mem.write_u16(offsets::NAV1, 0x1390).unwrap();
    let (mut session, _) = session_with(SessionConfig::default());
    session.poll_cycle(&mem);
    assert_eq!(session.flight_log().len(), 2);

    session.reset_session();
    assert_eq!(session.flight_log().len(), 2);
    assert!(!session.trackers().aircraft.parking_brake_set());

    // Back to defaults, so the live state is logged again on the next poll
    session.poll_cycle(&mem);
    assert_eq!(session.flight_log().len(), 4);
}

/// Delegates to an offset area but fails every read of one address
struct FlakySource {
    inner: OffsetMemory,
    failing: Address,
}

impl RawOffsetSource for FlakySource {
    fn read_int(&self, address: Address, width: usize) -> Result<i64> {
        self.check(address)?;
        self.inner.read_int(address, width)
    }

    fn read_fixed(&self, address: Address, width: usize) -> Result<f64> {
        self.check(address)?;
        self.inner.read_fixed(address, width)
    }

    fn read_bits(&self, address: Address, width: usize) -> Result<BitField> {
        self.check(address)?;
        self.inner.read_bits(address, width)
    }

    fn read_string(&self, address: Address, length: usize) -> Result<String> {
        self.check(address)?;
        self.inner.read_string(address, length)
    }
}

impl FlakySource {
    fn check(&self, address: Address) -> Result<()> {
        if address == self.failing {
            return Err(FsDataError::read(address, "timeout"));
        }
        Ok(())
    }
}

#[test]
fn test_failed_read_is_not_a_transition() {
    let mut mem = loaded_memory();
    mem.write_i16(offsets::PARKING_BRAKE, 32767).unwrap();
    let (mut session, logger) = session_with(SessionConfig::default());
    session.poll_cycle(&mem);

    // Brake released, but the read times out
    mem.write_i16(offsets::PARKING_BRAKE, 0).unwrap();
    let flaky = FlakySource {
        inner: mem,
        failing: offsets::PARKING_BRAKE,
    };
    let report = session.poll_cycle(&flaky);
    assert_eq!(report.entries_appended, 0);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].tracker, "parking brake");
    assert!(session.trackers().aircraft.parking_brake_set());
    assert!(logger
        .records()
        .iter()
        .any(|r| r.message == "Failed to update parking brake" && r.severity == Severity::Warning));

    // Once the read succeeds the release is logged
    session.poll_cycle(&flaky.inner);
    assert_eq!(
        session.flight_log().messages(),
        vec!["Parking Brake Set", "Parking Brake Released"]
    );
}
