use std::io::{self, BufRead, Write};

use clap::Parser;
use log::{debug, error};

mod cli;
mod derivation;
mod diagram;
mod error;
mod geo;
mod output;
mod spacing;
mod state;
mod sun;
mod svg;

use cli::{Args, COMMAND_HELP, Command, DepInfo, parse_command};
use error::SpacingError;
use output::{JsonReport, TerminalReport};
use spacing::SpacingInputs;
use state::SpacingState;
use svg::SvgFile;

// ===================== MAIN =====================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if args.show_build_info {
        print_build_info()?;
        return Ok(());
    }

    let inputs = SpacingInputs::clamped(args.panel_length, args.tilt, args.solar_altitude);
    debug!("starting with {:?}", inputs);

    let mut state = SpacingState::new(inputs);
    if let Some(path) = &args.svg {
        state.subscribe(Box::new(SvgFile::new(path)))?;
    }
    if args.json {
        state.subscribe(Box::new(JsonReport))?;
    } else {
        state.subscribe(Box::new(TerminalReport::new(!args.no_derivation)))?;
    }

    if args.interactive {
        run_interactive(&mut state, io::stdin().lock())?;
        debug!(
            "session ended at {:?}, D = {:.4} m",
            state.inputs(),
            state.geometry().metrics.inter_row_spacing
        );
    }

    Ok(())
}

// ===================== BUILD INFO =====================

fn print_build_info() -> Result<(), SpacingError> {
    println!("Built from Git commit: {}\n", env!("ROWSPACING_GIT_HASH"));
    const DEP_INFO_RAW: &str = include_str!(env!("ROWSPACING_DEPS_INFO_PATH"));
    let deps: Vec<DepInfo> = serde_json::from_str(DEP_INFO_RAW)?;

    println!("Found {} dependencies.", deps.len());
    for dep in deps {
        println!("- {} v{}", dep.name, dep.version);
        if let Some(sum) = dep.checksum {
            println!("    Checksum: {}", sum);
        }
        if let Some(src) = dep.source {
            println!("    Source:   {}", src);
        }
    }
    Ok(())
}

// ===================== INTERACTIVE MODE =====================

/// Apply one command to the state. Returns false when the loop should end.
fn apply_command(state: &mut SpacingState, command: Command) -> Result<bool, SpacingError> {
    match command {
        Command::PanelLength(v) => state.set_panel_length(v)?,
        Command::Tilt(v) => state.set_tilt(v)?,
        Command::SolarAltitude(v) => state.set_solar_altitude(v)?,
        Command::Show => state.refresh()?,
        Command::Help => println!("{}", COMMAND_HELP),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn run_interactive(state: &mut SpacingState, input: impl BufRead) -> Result<(), SpacingError> {
    println!("{}", COMMAND_HELP);
    prompt()?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Some(command)) => {
                if !apply_command(state, command)? {
                    break;
                }
            }
            Ok(None) => {}
            Err(reason) => {
                let err = SpacingError::InvalidCommand { line: line.trim().to_string(), reason };
                error!("{}", err);
                eprintln!("{}", err);
            }
        }
        prompt()?;
    }
    Ok(())
}

fn prompt() -> Result<(), SpacingError> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::diagram::DerivedGeometry;
    use crate::state::GeometryConsumer;

    struct Inputs(Rc<RefCell<Vec<SpacingInputs>>>);

    impl GeometryConsumer for Inputs {
        fn publish(&mut self, geometry: &DerivedGeometry) -> Result<(), SpacingError> {
            self.0.borrow_mut().push(geometry.inputs);
            Ok(())
        }
    }

    fn recorded() -> (SpacingState, Rc<RefCell<Vec<SpacingInputs>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut state = SpacingState::new(SpacingInputs::default());
        state.subscribe(Box::new(Inputs(seen.clone()))).unwrap();
        (state, seen)
    }

    #[test]
    fn test_interactive_session_applies_commands() {
        let (mut state, seen) = recorded();
        let script = "tilt 45\n\nbogus\naltitude 20\nlength 2\nshow\nquit\ntilt 10\n";
        run_interactive(&mut state, script.as_bytes()).unwrap();

        assert_eq!(*state.inputs(), SpacingInputs::clamped(2.0, 45.0, 20.0));
        // Initial snapshot, three setters and one refresh; nothing after quit
        assert_eq!(seen.borrow().len(), 5);
        assert!((state.geometry().metrics.closed_form_spacing - 3.7475).abs() < 1e-3);
    }

    #[test]
    fn test_interactive_session_ends_at_eof() {
        let (mut state, seen) = recorded();
        run_interactive(&mut state, "tilt 5".as_bytes()).unwrap();
        assert_eq!(state.inputs().tilt_deg, 5.0);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_apply_command_quit() {
        let (mut state, _) = recorded();
        assert!(!apply_command(&mut state, Command::Quit).unwrap());
        assert!(apply_command(&mut state, Command::Help).unwrap());
    }
}
