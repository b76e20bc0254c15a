//! # Facture Entry Point
//!
//! ## Startup Sequence
//! 1. Parse the command line
//! 2. Initialize tracing (logging, stderr)
//! 3. Load configuration (file, then `FACTURE_*` environment)
//! 4. Open the record store (creating missing workbooks)
//! 5. Run one command, print its result
//! 6. Exit non-zero on any error

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    facture_app_lib::run()
}
