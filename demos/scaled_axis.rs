use hidvalue::{ElementTable, MonotonicClock, ScaleType, Value, ValueContext};
use tracing_subscriber::EnvFilter;

const PROFILE: &str = r#"
[[element]]
usage_page = 1
usage = 0x30
report_size = 16
logical_min = -32768
logical_max = 32767
physical_min = -450.0
physical_max = 450.0
unit_exponent = -1

[element.calibration]
dead_zone_min = -1024
dead_zone_max = 1024
granularity = 0.01

[[element]]
usage_page = 2
usage = 0xBB
report_size = 10
logical_min = 0
logical_max = 1023

[element.calibration]
saturation_min = 40
saturation_max = 1000
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")))
        .init();

    let table = ElementTable::from_toml_str(PROFILE)?;
    let clock = MonotonicClock::new();
    let ctx = ValueContext::new(&table, &clock);

    let x = table.find("X").ok_or("no X axis in profile")?;
    let throttle = table.find("Throttle").ok_or("no throttle in profile")?;

    // Raw report payloads as a capture layer would hand them over.
    let report = [0x00u8, 0x40, 0xFF, 0x03];
    let samples = [
        Value::with_data(&ctx, x, &report[..2])?,
        Value::with_bytes(&ctx, throttle, Some(&report[2..]), 2)?,
        Value::with_bytes_no_copy(&ctx, x, vec![0x00, 0x02])?,
        Value::with_integer(&ctx, throttle, 512)?,
    ];

    for value in &samples {
        let name = value.element(&table)?.display_name();
        println!(
            "{name:>8} @ {}: raw={:?} int={} physical={:.2} calibrated={:+.3} exponent={:.2}",
            value.time_stamp(),
            value.bytes(),
            value.integer_value(),
            value.scaled_value(ScaleType::Physical),
            value.scaled_value(ScaleType::Calibrated),
            value.scaled_value(ScaleType::Exponent),
        );
    }

    Ok(())
}
