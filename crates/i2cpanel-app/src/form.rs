use i2cpanel_core::panel::{self, STOP_MEMORY_ACTIVE, STOP_MEMORY_DEFAULT, STOP_MEMORY_INACTIVE};
use i2cpanel_core::{Outcome, Radix, Target, Transport, REGISTER_COUNT};
use serde::Deserialize;

/// Send button that submitted the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    SlaveMain,
    RegisterBank,
    StopMemory,
}

impl Action {
    pub fn target(&self) -> Target {
        match self {
            Self::SlaveMain => Target::SlaveMain,
            Self::RegisterBank => Target::RegisterBank,
            Self::StopMemory => Target::StopMemory,
        }
    }
}

/// The whole page is one form, so every submit carries all three panels.
///
/// `shown_radix` is the base the slave-main value was rendered in; `radix` is
/// the data-type dropdown, which may have just changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PanelForm {
    pub radix: Option<Radix>,
    pub shown_radix: Option<Radix>,
    pub slave_main: Option<String>,
    pub register_1: Option<String>,
    pub register_2: Option<String>,
    pub register_3: Option<String>,
    pub stop_memory: Option<String>,
    pub action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub radix: Radix,
    pub slave_main: u8,
    pub registers: [u8; REGISTER_COUNT],
    pub stop_memory: u8,
    pub outcome: Option<(Target, Outcome)>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            radix: Radix::default(),
            slave_main: 0,
            registers: [0; REGISTER_COUNT],
            stop_memory: STOP_MEMORY_INACTIVE,
            outcome: None,
        }
    }
}

impl PanelForm {
    fn shown_radix(&self) -> Radix {
        self.shown_radix.or(self.radix).unwrap_or_default()
    }

    fn slave_main_text(&self) -> String {
        self.slave_main
            .clone()
            .unwrap_or_else(|| self.shown_radix().format(0))
    }

    fn register_texts(&self) -> [String; REGISTER_COUNT] {
        [&self.register_1, &self.register_2, &self.register_3]
            .map(|text| text.clone().unwrap_or_else(|| Radix::Binary.format(0)))
    }

    fn stop_memory_text(&self) -> String {
        self.stop_memory
            .clone()
            .unwrap_or_else(|| STOP_MEMORY_DEFAULT.to_string())
    }

    /// Selections to render back. Anything that does not decode falls back to
    /// the panel default.
    pub fn state(&self) -> PanelState {
        let registers = self
            .register_texts()
            .map(|text| Radix::Binary.parse(&text).unwrap_or(0));
        let stop_memory = match panel::stop_memory_byte(&self.stop_memory_text()) {
            Ok(STOP_MEMORY_ACTIVE) => STOP_MEMORY_ACTIVE,
            _ => STOP_MEMORY_INACTIVE,
        };

        PanelState {
            radix: self.radix.unwrap_or_default(),
            slave_main: self.shown_radix().parse(&self.slave_main_text()).unwrap_or(0),
            registers,
            stop_memory,
            outcome: None,
        }
    }
}

/// Performs the submitted action, if any, and returns the page state to render.
pub fn apply<T: Transport + ?Sized>(form: &PanelForm, bus: &mut T) -> PanelState {
    let mut state = form.state();
    if let Some(action) = form.action {
        let outcome = match action {
            Action::SlaveMain => {
                panel::send_slave_main(bus, form.shown_radix(), &form.slave_main_text())
            }
            Action::RegisterBank => {
                let [r1, r2, r3] = form.register_texts();
                panel::send_register_bank(bus, [r1.as_str(), r2.as_str(), r3.as_str()])
            }
            Action::StopMemory => panel::send_stop_memory(bus, &form.stop_memory_text()),
        };
        state.outcome = Some((action.target(), outcome));
    }
    state
}
