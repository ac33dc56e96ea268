use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::config::AlertConfig;

/// Plays the prayer-time alert.
pub trait AlertSink {
    fn play(&self) -> Result<()>;
}

/// Rings the terminal bell.
pub struct TerminalBell;

impl AlertSink for TerminalBell {
    fn play(&self) -> Result<()> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07").context("Writing bell")?;
        out.flush().context("Flushing bell")?;
        Ok(())
    }
}

/// Runs an external player without waiting for it to finish.
pub struct CommandAlert {
    program: String,
    args: Vec<String>,
}

impl CommandAlert {
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl AlertSink for CommandAlert {
    fn play(&self) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Starting {}", self.program))?;

        std::thread::spawn(move || match child.wait() {
            Ok(status) if !status.success() => warn!("Alert player exited with {}", status),
            Ok(_) => {}
            Err(e) => warn!("Waiting for alert player: {}", e),
        });
        Ok(())
    }
}

pub fn from_config(config: &AlertConfig) -> Box<dyn AlertSink> {
    match CommandAlert::new(&config.command) {
        Some(cmd) => Box::new(cmd),
        None => Box::new(TerminalBell),
    }
}

/// Play the alert, logging instead of failing.
pub fn play(sink: &dyn AlertSink) {
    debug!("Playing prayer alert");
    if let Err(e) = sink.play() {
        warn!("Alert playback failed: {:#}", e);
    }
}
