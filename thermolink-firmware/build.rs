//! Build script for the Thermolink firmware
//!
//! - Places memory.x on the linker search path
//! - Validates board.toml and fails the build on bad values
//! - Generates `board_config.rs` from it, included by `src/board.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// PLL input: HSI (8 MHz) halved
const PLL_INPUT_HZ: i64 = 4_000_000;

/// Highest APB1 frequency the F1 supports
const PCLK1_MAX_HZ: i64 = 36_000_000;

/// ADC prescaler applied to APB2 (= SYSCLK)
const ADC_PRESCALER: i64 = 6;

/// Highest ADC clock the F1 supports
const ADC_CLOCK_MAX_HZ: i64 = 14_000_000;

/// Validated board settings
struct Board {
    baudrate: i64,
    sysclk_hz: i64,
    pclk1_hz: i64,
    vref_uv: i64,
    v25_uv: i64,
    avg_slope_uv_per_c: i64,
    settle_us: i64,
    calibration_polls: i64,
    conversion_polls: i64,
    transmit_polls: i64,
}

fn main() {
    setup_linker();
    let board = validate_config();
    generate_config(&board);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml at compile time
fn validate_config() -> Board {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml configuration file.          ║\n\
            ║  Please create one in the thermolink-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_required_sections(&config);

    let mut errors = Vec::new();
    let mut get = |section: &str, key: &str| -> i64 {
        match config.get(section).and_then(|s| s.get(key)) {
            Some(toml::Value::Integer(v)) => *v,
            Some(_) => {
                errors.push(format!("[{}] '{}' must be an integer", section, key));
                0
            }
            None => {
                errors.push(format!("[{}] missing '{}'", section, key));
                0
            }
        }
    };

    let board = Board {
        baudrate: get("serial", "baudrate"),
        sysclk_hz: get("clock", "sysclk_hz"),
        pclk1_hz: get("clock", "pclk1_hz"),
        vref_uv: get("sensor", "vref_uv"),
        v25_uv: get("sensor", "v25_uv"),
        avg_slope_uv_per_c: get("sensor", "avg_slope_uv_per_c"),
        settle_us: get("sensor", "settle_us"),
        calibration_polls: get("timeouts", "calibration_polls"),
        conversion_polls: get("timeouts", "conversion_polls"),
        transmit_polls: get("timeouts", "transmit_polls"),
    };

    report_errors("Missing or mistyped values in board.toml", &errors);

    validate_clock(&board);
    validate_serial(&board);
    validate_sensor(&board);
    validate_timeouts(&board);

    println!("cargo:warning=board.toml validated successfully");
    board
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fail the build with a boxed list of errors
fn report_errors(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Validate that required sections exist
fn validate_required_sections(config: &toml::Value) {
    let errors: Vec<String> = ["serial", "clock", "sensor", "timeouts"]
        .iter()
        .filter(|section| !matches!(config.get(**section), Some(toml::Value::Table(_))))
        .map(|section| format!("Missing [{}] section", section))
        .collect();

    report_errors("Missing required sections in board.toml", &errors);
}

/// The clock tree is HSI/2 -> PLL -> SYSCLK -> APB1 / APB2 -> ADC /6
fn validate_clock(board: &Board) {
    let mut errors = Vec::new();

    let sysclk = board.sysclk_hz;
    if sysclk % PLL_INPUT_HZ != 0 || !(2..=16).contains(&(sysclk / PLL_INPUT_HZ)) {
        errors.push("[clock] sysclk_hz must be 4 MHz x 2..16 (8-64 MHz)".to_string());
    }

    let pclk1 = board.pclk1_hz;
    if pclk1 <= 0 || sysclk % pclk1 != 0 || ![1, 2, 4, 8, 16].contains(&(sysclk / pclk1)) {
        errors.push("[clock] pclk1_hz must be sysclk_hz / 1, 2, 4, 8 or 16".to_string());
    }
    if pclk1 > PCLK1_MAX_HZ {
        errors.push("[clock] pclk1_hz must not exceed 36 MHz".to_string());
    }

    if sysclk / ADC_PRESCALER > ADC_CLOCK_MAX_HZ {
        errors.push("[clock] sysclk_hz / 6 exceeds the 14 MHz ADC clock".to_string());
    }

    report_errors("Invalid [clock] section in board.toml", &errors);
}

/// USART BRR is pclk / baud and must fit 16..=0xFFFF
fn validate_serial(board: &Board) {
    let mut errors = Vec::new();

    if board.baudrate <= 0 {
        errors.push("[serial] baudrate must be positive".to_string());
    } else {
        let divisor = board.pclk1_hz / board.baudrate;
        if !(16..=0xFFFF).contains(&divisor) {
            errors.push(format!(
                "[serial] baudrate {} not reachable from pclk1 {}",
                board.baudrate, board.pclk1_hz
            ));
        }
    }

    report_errors("Invalid [serial] section in board.toml", &errors);
}

fn validate_sensor(board: &Board) {
    let mut errors = Vec::new();

    for (key, value) in [
        ("vref_uv", board.vref_uv),
        ("v25_uv", board.v25_uv),
        ("avg_slope_uv_per_c", board.avg_slope_uv_per_c),
    ] {
        if value <= 0 || value > u32::MAX as i64 {
            errors.push(format!("[sensor] {} must be a positive u32", key));
        }
    }
    if board.v25_uv >= board.vref_uv {
        errors.push("[sensor] v25_uv must be below vref_uv".to_string());
    }
    if !(1..=1000).contains(&board.settle_us) {
        errors.push("[sensor] settle_us must be 1-1000".to_string());
    }

    report_errors("Invalid [sensor] section in board.toml", &errors);
}

fn validate_timeouts(board: &Board) {
    let mut errors = Vec::new();

    for (key, value) in [
        ("calibration_polls", board.calibration_polls),
        ("conversion_polls", board.conversion_polls),
        ("transmit_polls", board.transmit_polls),
    ] {
        if value <= 0 || value > u32::MAX as i64 {
            errors.push(format!("[timeouts] {} must be a positive u32", key));
        }
    }

    report_errors("Invalid [timeouts] section in board.toml", &errors);
}

/// Write `board_config.rs` into OUT_DIR
fn generate_config(board: &Board) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let pll_mul = board.sysclk_hz / PLL_INPUT_HZ;
    let apb1_div = board.sysclk_hz / board.pclk1_hz;
    let settle_cycles = board.sysclk_hz / 1_000_000 * board.settle_us;

    let generated = format!(
        "// Generated by build.rs from board.toml. Do not edit.

/// Board configuration compiled from board.toml
pub const BOARD: FirmwareConfig = FirmwareConfig {{
    serial: SerialSettings {{
        baudrate: {baudrate},
        pclk1_hz: {pclk1_hz},
    }},
    calibration: SensorCalibration {{
        vref_uv: {vref_uv},
        v25_uv: {v25_uv},
        avg_slope_uv_per_c: {avg_slope_uv_per_c},
    }},
    budgets: WaitBudgets {{
        calibration: {calibration_polls},
        conversion: {conversion_polls},
        transmit: {transmit_polls},
    }},
    settle_cycles: {settle_cycles},
}};

/// SYSCLK in Hz
pub const SYSCLK_HZ: u32 = {sysclk_hz};

/// PLL multiplier applied to HSI/2
const PLL_MUL: PllMul = PllMul::MUL{pll_mul};

/// APB1 prescaler
const APB1_PRE: APBPrescaler = APBPrescaler::DIV{apb1_div};
",
        baudrate = board.baudrate,
        pclk1_hz = board.pclk1_hz,
        vref_uv = board.vref_uv,
        v25_uv = board.v25_uv,
        avg_slope_uv_per_c = board.avg_slope_uv_per_c,
        calibration_polls = board.calibration_polls,
        conversion_polls = board.conversion_polls,
        transmit_polls = board.transmit_polls,
        settle_cycles = settle_cycles,
        sysclk_hz = board.sysclk_hz,
        pll_mul = pll_mul,
        apb1_div = apb1_div,
    );

    fs::write(out_dir.join("board_config.rs"), generated).unwrap();
}
