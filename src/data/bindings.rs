//! Draw-mode key bindings and their persistence.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

/// A held modifier key that gates a draw mode while it is down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawKey {
    Shift,
    Alt,
    Ctrl,
    Command,
}

impl fmt::Display for DrawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DrawKey::Shift => "Shift",
            DrawKey::Alt => "Alt",
            DrawKey::Ctrl => "Ctrl",
            DrawKey::Command => "Cmd",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for DrawKey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shift" => Ok(DrawKey::Shift),
            "alt" => Ok(DrawKey::Alt),
            "ctrl" | "control" => Ok(DrawKey::Ctrl),
            "cmd" | "command" => Ok(DrawKey::Command),
            other => Err(format!("unknown draw key '{}'", other)),
        }
    }
}

impl DrawKey {
    /// Whether this key is currently held, given the frame's modifier state.
    pub fn is_down(self, m: &egui::Modifiers) -> bool {
        match self {
            DrawKey::Shift => m.shift,
            DrawKey::Alt => m.alt,
            DrawKey::Ctrl => m.ctrl,
            DrawKey::Command => m.command,
        }
    }
}

/// All configurable bindings: the two draw triggers and the screenshot key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawBindings {
    /// Held key that enters segment-drawing mode.
    pub segment: DrawKey,
    /// Held key that enters band-drawing mode. Must differ from `segment`.
    pub band: DrawKey,
    /// Plain character key that saves a PNG screenshot.
    pub save_png: char,
}

impl Default for DrawBindings {
    fn default() -> Self {
        Self {
            segment: DrawKey::Shift,
            band: DrawKey::Alt,
            save_png: 'S',
        }
    }
}

impl DrawBindings {
    pub fn reset_defaults(&mut self) {
        *self = DrawBindings::default();
    }

    /// The two draw triggers must be distinct keys.
    pub fn validate(&self) -> Result<(), String> {
        if self.segment == self.band {
            return Err(format!(
                "segment and band draw keys must differ (both are {})",
                self.segment
            ));
        }
        Ok(())
    }

    /// Save bindings to the default path `~/.plotmark/bindings.yaml`.
    pub fn save_to_default_path(&self) -> Result<(), String> {
        let home = std::env::var("HOME").map_err(|e| format!("HOME env var not set: {}", e))?;
        let dir = PathBuf::from(home).join(".plotmark");
        if let Err(e) = fs::create_dir_all(&dir) {
            return Err(format!("Failed to create dir {:?}: {}", dir, e));
        }
        let path = dir.join("bindings.yaml");
        let s = serde_yaml::to_string(self).map_err(|e| format!("Serialization error: {}", e))?;
        let mut f = fs::File::create(&path)
            .map_err(|e| format!("Failed to create file {:?}: {}", path, e))?;
        f.write_all(s.as_bytes())
            .map_err(|e| format!("Failed to write file {:?}: {}", path, e))?;
        Ok(())
    }

    /// Load bindings from `~/.plotmark/bindings.yaml` if present and valid.
    pub fn load_from_default_path() -> Result<DrawBindings, String> {
        let home = std::env::var("HOME").map_err(|e| format!("HOME env var not set: {}", e))?;
        let path = PathBuf::from(home).join(".plotmark").join("bindings.yaml");
        if !path.exists() {
            return Err(format!("Bindings file {:?} does not exist", path));
        }
        let s =
            fs::read_to_string(&path).map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
        let b: DrawBindings =
            serde_yaml::from_str(&s).map_err(|e| format!("Deserialization error: {}", e))?;
        b.validate()?;
        Ok(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("shift".parse::<DrawKey>().unwrap(), DrawKey::Shift);
        assert_eq!("Control".parse::<DrawKey>().unwrap(), DrawKey::Ctrl);
        assert_eq!("cmd".parse::<DrawKey>().unwrap(), DrawKey::Command);
        assert!("hyper".parse::<DrawKey>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for key in [DrawKey::Shift, DrawKey::Alt, DrawKey::Ctrl, DrawKey::Command] {
            assert_eq!(key.to_string().parse::<DrawKey>().unwrap(), key);
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(DrawBindings::default().validate().is_ok());
    }

    #[test]
    fn identical_triggers_are_rejected() {
        let b = DrawBindings {
            segment: DrawKey::Shift,
            band: DrawKey::Shift,
            save_png: 'S',
        };
        assert!(b.validate().is_err());
    }

    #[test]
    fn is_down_reads_modifier_state() {
        let m = egui::Modifiers {
            shift: true,
            ..Default::default()
        };
        assert!(DrawKey::Shift.is_down(&m));
        assert!(!DrawKey::Alt.is_down(&m));
    }
}
