//! Credential register: the 4-bit secret code and its "programmed" flag.
//!
//! A write lands only on a rising edge of confirm while configuration mode
//! is asserted.  The new value is registered, so consumers reading the
//! store see it from the next tick on.

use log::info;

use crate::drivers::debounce::EdgeDetector;
use crate::pins::SW_CODE_MASK;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Credential {
    pub code: u8,
    pub programmed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CredentialStore {
    credential: Credential,
    confirm: EdgeDetector,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick.  Returns `true` when a write was accepted.
    pub fn step(&mut self, config_mode: bool, confirm: bool, new_code: u8, reset: bool) -> bool {
        let confirm = self.confirm.rising(confirm);

        if reset {
            *self = Self::new();
            return false;
        }

        if config_mode && confirm {
            self.credential = Credential {
                code: new_code & SW_CODE_MASK,
                programmed: true,
            };
            info!("CREDENTIAL: new code programmed");
            return true;
        }

        false
    }

    pub fn read(&self) -> Credential {
        self.credential
    }
}
