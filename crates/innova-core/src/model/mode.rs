// ── Operating modes ──
//
// Each firmware family numbers its modes differently, so every family
// carries its own registry. Lookups never fail: unknown codes resolve to
// the `Mode::UNKNOWN` sentinel.

use serde::Serialize;
use strum::{Display, EnumIter};

/// The operating regime a mode puts the unit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ModeKind {
    Heat,
    Cool,
    Dehumidify,
    FanOnly,
    Auto,
}

/// A wire-level operating mode: the command that selects it and the code
/// the unit reports back in `wm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Mode {
    command: &'static str,
    code: i64,
    kind: Option<ModeKind>,
}

impl Mode {
    /// Sentinel for codes a family does not define.
    pub const UNKNOWN: Self = Self {
        command: "",
        code: -1,
        kind: None,
    };

    pub const fn new(command: &'static str, code: i64, kind: ModeKind) -> Self {
        Self {
            command,
            code,
            kind: Some(kind),
        }
    }

    pub fn command(&self) -> &'static str {
        self.command
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn kind(&self) -> Option<ModeKind> {
        self.kind
    }

    pub fn is_unknown(&self) -> bool {
        self.kind.is_none()
    }

    pub fn is_heating(&self) -> bool {
        self.kind == Some(ModeKind::Heat)
    }

    pub fn is_cooling(&self) -> bool {
        self.kind == Some(ModeKind::Cool)
    }

    pub fn is_dehumidifying(&self) -> bool {
        self.kind == Some(ModeKind::Dehumidify)
    }

    pub fn is_fan_only(&self) -> bool {
        self.kind == Some(ModeKind::FanOnly)
    }

    pub fn is_auto(&self) -> bool {
        self.kind == Some(ModeKind::Auto)
    }
}

/// Immutable per-family mode table.
#[derive(Debug, Clone, Copy)]
pub struct ModeRegistry {
    modes: &'static [Mode],
}

impl ModeRegistry {
    pub const fn new(modes: &'static [Mode]) -> Self {
        Self { modes }
    }

    pub fn supported_modes(&self) -> &'static [Mode] {
        self.modes
    }

    /// Mode reported under `code`, or [`Mode::UNKNOWN`].
    pub fn get_mode(&self, code: i64) -> Mode {
        self.modes
            .iter()
            .find(|m| m.code == code)
            .copied()
            .unwrap_or(Mode::UNKNOWN)
    }

    /// The family's mode of the given kind, if it has one.
    pub fn find(&self, kind: ModeKind) -> Option<Mode> {
        self.modes.iter().find(|m| m.kind == Some(kind)).copied()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const TABLE: ModeRegistry = ModeRegistry::new(&[
        Mode::new("set/mode/heating", 0, ModeKind::Heat),
        Mode::new("set/mode/cooling", 1, ModeKind::Cool),
    ]);

    #[test]
    fn lookup_by_code() {
        for mode in TABLE.supported_modes() {
            assert_eq!(TABLE.get_mode(mode.code()), *mode);
        }
    }

    #[test]
    fn unknown_code_is_sentinel() {
        let mode = TABLE.get_mode(42);
        assert_eq!(mode, Mode::UNKNOWN);
        assert_eq!(mode.code(), -1);
        assert!(mode.is_unknown());
        assert!(
            !(mode.is_heating()
                || mode.is_cooling()
                || mode.is_dehumidifying()
                || mode.is_fan_only()
                || mode.is_auto())
        );
    }

    #[test]
    fn exactly_one_flag_per_concrete_mode() {
        use strum::IntoEnumIterator;
        for kind in ModeKind::iter() {
            let mode = Mode::new("x", 9, kind);
            let flags = [
                mode.is_heating(),
                mode.is_cooling(),
                mode.is_dehumidifying(),
                mode.is_fan_only(),
                mode.is_auto(),
            ];
            assert_eq!(flags.iter().filter(|f| **f).count(), 1, "{kind}");
        }
    }

    #[test]
    fn find_by_kind() {
        assert_eq!(TABLE.find(ModeKind::Cool).map(|m| m.code()), Some(1));
        assert_eq!(TABLE.find(ModeKind::FanOnly), None);
    }

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<i64> = TABLE.supported_modes().iter().map(Mode::code).collect();
        assert_eq!(codes.len(), TABLE.supported_modes().len());
    }
}
