/*!
wifiscope: a cross-platform CLI that observes and manipulates the host's
Wi-Fi subsystem.

The interesting machinery lives in [`core::monitor`]: a polling loop that
derives a composite connectivity state, classifies transitions between
successive samples into a fixed event taxonomy, and fans each event out to
stdout, an NDJSON log file and a user-supplied hook program. The OS-specific
actuation behind it is the flat capability set in [`core::os`].
*/

pub mod cli;
pub mod config;
pub mod core;
