// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io, sync::{Arc, MutexGuard}};

use super::{SafeRawTerminal, SendRawTerminal, StdMutex};

/// Macro to simplify locking and getting a mutable reference to the output device.
///
/// Usage example:
/// ```rust
/// use r3bl_line_reader::{OutputDevice, lock_output_device_as_mut};
/// use std::io::Write;
///
/// # fn write_it() -> std::io::Result<()> {
/// let device = OutputDevice::new_stdout();
/// lock_output_device_as_mut!(device).write_all(b"Hello, world!\n")?;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! lock_output_device_as_mut {
    ($device:expr) => {
        &mut *$device.lock()?
    };
}

/// The place rendered bytes go. Cloning shares the same underlying writer.
#[derive(Clone)]
pub struct OutputDevice {
    pub resource: SafeRawTerminal,
    pub is_mock: bool,
}

impl std::fmt::Debug for OutputDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputDevice")
            .field("is_mock", &self.is_mock)
            .finish_non_exhaustive()
    }
}

impl OutputDevice {
    #[must_use]
    pub fn new_stdout() -> Self {
        let stdout: SafeRawTerminal = Arc::new(StdMutex::new(std::io::stdout()));
        Self {
            resource: stdout,
            is_mock: false,
        }
    }

    /// Lock the writer. A poisoned lock surfaces as an [`io::Error`].
    ///
    /// # Errors
    ///
    /// Returns an error if another thread panicked while holding the lock.
    pub fn lock(&self) -> io::Result<MutexGuard<'_, SendRawTerminal>> {
        self.resource
            .lock()
            .map_err(|_| io::Error::other("output device lock is poisoned"))
    }
}
