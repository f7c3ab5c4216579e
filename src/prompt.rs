//! Interactive line configuration read from a terminal.

use crate::core::errors::SimError;
use crate::core::execution::config::SimulationConfig;
use crate::core::timing::MachineCounts;
use crate::core::types::SimTime;
use std::io::{BufRead, Write};

/// Prompts, in the order they are asked.
pub const PROMPTS: [&str; 8] = [
    "Enter the number of machines for raw material handling: ",
    "Enter the number of machines for machining: ",
    "Enter the number of machines for assembly: ",
    "Enter the number of machines for quality control: ",
    "Enter the number of machines for packaging: ",
    "Enter the setup change time: ",
    "Enter the maintenance interval: ",
    "Enter the shift length: ",
];

/// Ask for the eight line parameters and apply them on top of `base`.
///
/// Every answer must be a positive integer; anything else is an
/// `InvalidConfiguration` error.
pub fn read_config<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    base: SimulationConfig,
) -> Result<SimulationConfig, SimError> {
    let mut values = [0u64; PROMPTS.len()];
    for (value, prompt) in values.iter_mut().zip(PROMPTS) {
        write!(output, "{}", prompt)
            .and_then(|_| output.flush())
            .map_err(|e| SimError::InvalidConfiguration(format!("cannot write prompt: {}", e)))?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .map_err(|e| SimError::InvalidConfiguration(format!("cannot read input: {}", e)))?;
        if read == 0 {
            return Err(SimError::InvalidConfiguration(format!(
                "input ended before answering \"{}\"",
                prompt.trim_end_matches([':', ' '])
            )));
        }
        *value = parse_positive(line.trim())?;
    }

    let [raw_material, machining, assembly, quality_control, packaging, setup_time, maintenance_interval, shift_length] =
        values;
    let machine_counts = MachineCounts {
        raw_material: machine_count(raw_material)?,
        machining: machine_count(machining)?,
        assembly: machine_count(assembly)?,
        quality_control: machine_count(quality_control)?,
        packaging: machine_count(packaging)?,
    };

    let config = base
        .with_machine_counts(machine_counts)
        .with_setup_time(setup_time)
        .with_maintenance_interval(maintenance_interval)
        .with_shift_length(shift_length);
    config.validate()?;
    Ok(config)
}

fn parse_positive(text: &str) -> Result<SimTime, SimError> {
    match text.parse::<SimTime>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(SimError::InvalidConfiguration(format!(
            "expected a positive integer, got {:?}",
            text
        ))),
    }
}

fn machine_count(value: u64) -> Result<u32, SimError> {
    u32::try_from(value)
        .map_err(|_| SimError::InvalidConfiguration(format!("machine count {} is too large", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Stage;

    fn read(input: &str) -> Result<SimulationConfig, SimError> {
        read_config(input.as_bytes(), Vec::new(), SimulationConfig::default())
    }

    #[test]
    fn test_reads_all_values_in_order() {
        let config = read("1\n2\n3\n4\n5\n6\n70\n80\n").unwrap();
        assert_eq!(config.machine_counts.get(Stage::RawMaterial), 1);
        assert_eq!(config.machine_counts.get(Stage::Machining), 2);
        assert_eq!(config.machine_counts.get(Stage::Packaging), 5);
        assert_eq!(config.setup_time, 6);
        assert_eq!(config.maintenance_interval, 70);
        assert_eq!(config.shift_length, 80);
    }

    #[test]
    fn test_prompts_are_written() {
        let mut out = Vec::new();
        read_config("1\n1\n1\n1\n1\n5\n50\n40\n".as_bytes(), &mut out, SimulationConfig::default())
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(PROMPTS[0]));
        assert!(text.ends_with(PROMPTS[7]));
    }

    #[test]
    fn test_malformed_number_is_invalid_configuration() {
        assert!(matches!(
            read("1\n1\nthree\n1\n1\n5\n50\n40\n"),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_and_negative_values_rejected() {
        assert!(read("0\n1\n1\n1\n1\n5\n50\n40\n").is_err());
        assert!(read("1\n1\n1\n1\n1\n-5\n50\n40\n").is_err());
    }

    #[test]
    fn test_truncated_input_rejected() {
        assert!(read("1\n1\n1\n").is_err());
    }

    #[test]
    fn test_keeps_base_seed() {
        let config = read_config(
            "1\n1\n1\n1\n1\n5\n50\n40\n".as_bytes(),
            Vec::new(),
            SimulationConfig::default().with_seed(Some(3)),
        )
        .unwrap();
        assert_eq!(config.seed, Some(3));
    }
}
