// ============================================================================
// Keypad Session Example
// ============================================================================
//
// Reads button labels from stdin, one line at a time, and prints the display
// after each line. A line starting with `paste ` replaces the entry instead.
//
//   echo "1 2 . 5 + 3 × 2 =" | cargo run --example keypad_session --features logging
// ============================================================================

use pocket_calc::interfaces::{CalculatorEvent, EventHandler};
use pocket_calc::prelude::*;
use std::io::{self, BufRead};
use std::sync::Arc;

/// Forwards events to both the log and the tape
struct SessionHandler {
    logging: LoggingEventHandler,
    tape: Arc<TapeRecorder>,
}

impl EventHandler for SessionHandler {
    fn on_event(&self, event: CalculatorEvent) {
        self.tape.on_event(event.clone());
        self.logging.on_event(event);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(io::stderr)
        .init();

    let tape = Arc::new(TapeRecorder::new());
    let handler = Arc::new(SessionHandler {
        logging: LoggingEventHandler,
        tape: tape.clone(),
    });

    let mut calculator = match CalculatorBuilder::desktop().build(handler) {
        Ok(calculator) => calculator,
        Err(error) => {
            eprintln!("invalid configuration: {}", error);
            return;
        },
    };

    println!("=== Keypad Session ===\n");

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                eprintln!("failed to read input: {}", error);
                break;
            },
        };

        let outcome = match line.strip_prefix("paste ") {
            Some(text) => calculator.paste(text.trim()),
            None => calculator.press_labels(&line),
        };

        match outcome {
            Ok(()) => println!("[{:>16}]", calculator.display()),
            Err(error) => println!("[{:>16}]  ({})", calculator.display(), error),
        }
    }

    println!("\n=== Tape ===");
    for line in tape.lines() {
        println!("  {}", line);
    }
    println!("\nMemory: {}", calculator.memory());
}
