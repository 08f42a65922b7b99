//! Per-model entry point: a mode name plus up to three string arguments in,
//! reports on the wire out.
//!
//! | mode      | arg 1  | arg 2      | arg 3      |
//! |-----------|--------|------------|------------|
//! | `solid`   | color  |            |            |
//! | `cycle`   | rate   | brightness |            |
//! | `breathe` | color  | rate       | brightness |
//! | `intro`   | on/off |            |            |
//!
//! All validation happens in [`LedController::plan`], before any USB access.

use crate::binding::with_device;
use crate::codec::{self, LightingCommand};
use crate::color::{ColorParser, StandardColorParser};
use crate::error::{Error, Result};
use crate::params::{
    parse_toggle, validate_brightness, validate_color, validate_rate, Parameters,
};
use crate::profile::{DeviceModel, DeviceProfile, LedMode};
use crate::sender::send_all;
use crate::transport::UsbBus;
use std::fmt;
use tracing::{debug, info, info_span};

/// User-facing lighting modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Solid,
    Cycle,
    Breathe,
    Intro,
}

impl Mode {
    pub const ALL: &'static [Mode] = &[Mode::Solid, Mode::Cycle, Mode::Breathe, Mode::Intro];

    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "solid" => Ok(Self::Solid),
            "cycle" => Ok(Self::Cycle),
            "breathe" => Ok(Self::Breathe),
            "intro" => Ok(Self::Intro),
            _ => Err(Error::UnknownMode(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Cycle => "cycle",
            Self::Breathe => "breathe",
            Self::Intro => "intro",
        }
    }

    /// Argument synopsis for help output.
    pub fn usage(&self) -> &'static str {
        match self {
            Self::Solid => "solid {color}",
            Self::Cycle => "cycle [{rate} [{brightness}]]",
            Self::Breathe => "breathe {color} [{rate} [{brightness}]]",
            Self::Intro => "intro {on|off}",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Solid => "Solid color mode",
            Self::Cycle => "Cycle through all colors",
            Self::Breathe => "Single color breathing",
            Self::Intro => "Enable/disable startup effect",
        }
    }

    /// The lighting effect this mode drives, or `None` for the intro switch.
    pub fn led_mode(&self) -> Option<LedMode> {
        match self {
            Self::Solid => Some(LedMode::Solid),
            Self::Cycle => Some(LedMode::Cycle),
            Self::Breathe => Some(LedMode::Breathe),
            Self::Intro => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lighting control for one device model.
pub struct LedController<P: ColorParser = StandardColorParser> {
    model: DeviceModel,
    parser: P,
}

impl LedController<StandardColorParser> {
    pub fn new(model: DeviceModel) -> Self {
        Self::with_parser(model, StandardColorParser)
    }
}

impl<P: ColorParser> LedController<P> {
    pub fn with_parser(model: DeviceModel, parser: P) -> Self {
        Self { model, parser }
    }

    pub fn profile(&self) -> &'static DeviceProfile {
        self.model.profile()
    }

    /// Validate arguments and build the reports for `mode` without touching
    /// any device.
    pub fn plan(&self, mode: &str, args: &[&str]) -> Result<Vec<LightingCommand>> {
        let mode = Mode::from_name(mode)?;
        let arg = |i: usize| args.get(i).copied();
        let profile = self.profile();

        let Some(led_mode) = mode.led_mode() else {
            let enabled = parse_toggle(arg(0))?;
            debug!(enabled, "Intro effect");
            return Ok(vec![codec::encode_intro(profile, enabled)]);
        };

        let defaults = Parameters::default();
        let params = match led_mode {
            LedMode::Solid => Parameters {
                color: validate_color(arg(0), &self.parser)?,
                ..defaults
            },
            LedMode::Cycle => Parameters {
                rate: validate_rate(arg(0))?,
                brightness: validate_brightness(arg(1))?,
                ..defaults
            },
            LedMode::Breathe => Parameters {
                color: validate_color(arg(0), &self.parser)?,
                rate: validate_rate(arg(1))?,
                brightness: validate_brightness(arg(2))?,
            },
        };
        debug!(
            mode = %mode,
            color = %params.color,
            rate = params.rate,
            brightness = params.brightness,
            "Parameters validated"
        );

        Ok(codec::encode(profile, led_mode, &params))
    }

    /// Validate, bind the device, send every report and release it.
    ///
    /// Returns the number of control transfers issued.
    pub fn apply<B: UsbBus>(&self, bus: &B, mode: &str, args: &[&str]) -> Result<usize> {
        let _span = info_span!("apply", model = self.model.id(), mode).entered();

        let commands = self.plan(mode, args)?;
        with_device(bus, self.profile(), |handle| send_all(handle, &commands))?;

        info!(transfers = commands.len(), "Lighting updated");
        Ok(commands.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn mode_from_name_accepts_known_modes() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_name(mode.name()).unwrap(), *mode);
        }
        assert_eq!(Mode::from_name("SOLID").unwrap(), Mode::Solid);
    }

    #[test]
    fn mode_from_name_rejects_unknown() {
        assert!(matches!(
            Mode::from_name("strobe"),
            Err(Error::UnknownMode(m)) if m == "strobe"
        ));
    }

    #[test]
    fn plan_solid_requires_color() {
        let ctl = LedController::new(DeviceModel::G203);
        assert!(matches!(
            ctl.plan("solid", &[]),
            Err(Error::MissingParameter("color"))
        ));
    }

    #[test]
    fn plan_cycle_uses_defaults() {
        let ctl = LedController::new(DeviceModel::G203);
        let cmds = ctl.plan("cycle", &[]).unwrap();
        assert_eq!(
            cmds[0].to_hex(),
            "11ff0e3b00020000000000271064000000000000"
        );
    }

    #[test]
    fn plan_breathe_on_speakers_uses_speaker_opcode() {
        let ctl = LedController::new(DeviceModel::G560);
        let cmds = ctl.plan("breathe", &["00ff00", "2000", "40"]).unwrap();
        assert_eq!(cmds.len(), 4);
        assert!(cmds.iter().all(|c| c.mode_code() == 0x04));
        assert_eq!(hex::encode(cmds[0].data()), "00ff0007d0002800");
    }

    #[test]
    fn plan_intro_is_single_report_on_every_model() {
        for model in DeviceModel::ALL {
            let ctl = LedController::new(*model);
            assert_eq!(ctl.plan("intro", &["off"]).unwrap().len(), 1);
        }
    }

    #[test]
    fn plan_intro_rejects_unknown_toggle() {
        let ctl = LedController::new(DeviceModel::G560);
        assert!(matches!(
            ctl.plan("intro", &["sometimes"]),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn only_intro_has_no_led_mode() {
        for mode in Mode::ALL {
            assert_eq!(mode.led_mode().is_none(), *mode == Mode::Intro);
        }
        assert_eq!(Mode::Breathe.led_mode(), Some(LedMode::Breathe));
    }

    #[test]
    fn usage_starts_with_mode_name() {
        for mode in Mode::ALL {
            assert!(mode.usage().starts_with(mode.name()));
            assert!(!mode.description().is_empty());
        }
    }

    #[test]
    fn plan_solid_ignores_extra_arguments() {
        let ctl = LedController::new(DeviceModel::G203);
        let cmds = ctl.plan("solid", &["ff8800", "500", "20"]).unwrap();
        assert_eq!(hex::encode(cmds[0].data()), "ff88000000000000");
    }

    struct FixedParser(Rgb);

    impl ColorParser for FixedParser {
        fn parse(&self, _input: &str) -> Option<Rgb> {
            Some(self.0)
        }
    }

    #[test]
    fn plan_uses_injected_color_parser() {
        let ctl = LedController::with_parser(DeviceModel::G203, FixedParser(Rgb::new(1, 2, 3)));
        let cmds = ctl.plan("solid", &["anything"]).unwrap();
        assert_eq!(&cmds[0].data()[..3], &[1, 2, 3]);
    }
}
