//! Example configuration command

use eventcraft_core::config::EXAMPLE_CONFIG;

pub fn execute() {
    println!("{}", EXAMPLE_CONFIG.trim_start());
}
