use crate::commands::{CmdMessage, CmdResult, RallyPaths};
use crate::config::RallyConfig;
use crate::error::{RallyError, Result};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    SetMediaExt(String),
    SetRetentionDays(u32),
}

pub fn run(paths: &RallyPaths, action: ConfigAction) -> Result<CmdResult> {
    let mut config = RallyConfig::load(&paths.data)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => match key.as_str() {
            "media-ext" | "retention-days" => {}
            other => {
                return Err(RallyError::Api(format!("Unknown config key: {}", other)));
            }
        },
        ConfigAction::SetMediaExt(ext) => {
            config.set_media_ext(&ext);
            config.save(&paths.data)?;
            result.add_message(CmdMessage::success(format!(
                "media-ext set to {}",
                config.get_media_ext()
            )));
        }
        ConfigAction::SetRetentionDays(days) => {
            config.retention_days = days;
            config.save(&paths.data)?;
            let note = if days == 0 {
                "retention sweep disabled".to_string()
            } else {
                format!("retention-days set to {}", days)
            };
            result.add_message(CmdMessage::success(note));
        }
    }

    Ok(result.with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_show_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let paths = RallyPaths {
            data: dir.path().to_path_buf(),
        };

        run(&paths, ConfigAction::SetMediaExt("mov".into())).unwrap();
        run(&paths, ConfigAction::SetRetentionDays(7)).unwrap();

        let result = run(&paths, ConfigAction::ShowAll).unwrap();
        let config = result.config.unwrap();
        assert_eq!(config.media_ext, ".mov");
        assert_eq!(config.retention_days, 7);
    }

    #[test]
    fn unknown_key_is_an_api_error() {
        let dir = tempfile::tempdir().unwrap();
        let paths = RallyPaths {
            data: dir.path().to_path_buf(),
        };

        let err = run(&paths, ConfigAction::ShowKey("color".into()));
        assert!(matches!(err, Err(RallyError::Api(_))));
    }
}
