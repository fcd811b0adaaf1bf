//! Cross-subsystem flows over the shared bus.

pub mod harness;

#[cfg(test)]
mod flows;
#[cfg(test)]
mod rescan;
