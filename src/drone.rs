//! Well-known AR.Drone configuration keys.

use crate::config::SectionConfig;
use crate::error::ConfigResult;
use crate::registry::ConfigSection;

/// `control:flying_mode` codes as sent by the drone.
pub const FLYING_MODE_FREE_FLIGHT: i32 = 0;
pub const FLYING_MODE_HOVER_ON_TOP_OF_ROUNDEL: i32 = 1;
pub const FLYING_MODE_HOVER_ON_TOP_OF_ORIENTED_ROUNDEL: i32 = 2;

/// `video:video_codec` codes as sent by the drone.
pub const VIDEO_CODEC_H264_360P: i32 = 0x81;
pub const VIDEO_CODEC_H264_720P: i32 = 0x83;

/// Build the section holding the drone's standard configuration keys.
pub fn standard_section(config: SectionConfig) -> ConfigResult<ConfigSection> {
    let mut section = ConfigSection::new("ardrone").with_config(config);
    section
        // general
        .slot::<i32>("general:num_version_config")?
        .slot::<i32>("general:num_version_mb")?
        .slot::<String>("general:num_version_soft")?
        .slot::<String>("general:drone_serial")?
        .slot::<bool>("general:navdata_demo")?
        .slot::<i32>("general:navdata_options")?
        // control
        .slot::<i32>("control:altitude_max")?
        .slot::<i32>("control:altitude_min")?
        .slot::<f32>("control:euler_angle_max")?
        .slot::<f32>("control:control_vz_max")?
        .slot::<f32>("control:control_yaw")?
        .slot::<bool>("control:outdoor")?
        .slot::<bool>("control:flight_without_shell")?
        .slot::<i32>("control:flying_mode")?
        // network
        .slot::<Option<String>>("network:ssid_single_player")?
        .slot::<Option<String>>("network:owner_mac")?
        // video
        .slot::<i32>("video:video_codec")?
        .slot::<i32>("video:bitrate")?
        // gps
        .slot::<f64>("gps:latitude")?
        .slot::<f64>("gps:longitude")?;
    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{Value, ValueKind};

    #[test]
    fn test_standard_section_builds() {
        let section = standard_section(SectionConfig::default()).unwrap();
        assert_eq!(section.len(), 20);
        assert_eq!(
            section.get("control:flying_mode").map(|item| item.kind()),
            Some(ValueKind::Integer)
        );
    }

    #[test]
    fn test_numeric_mode_and_codec() {
        let mut section = standard_section(SectionConfig::default()).unwrap();
        let report = section
            .apply_dump("control:flying_mode = 0\nvideo:video_codec = 129\n")
            .unwrap();
        assert!(report.is_clean());
        assert_eq!(report.changed, vec!["video:video_codec"]);
        assert_eq!(report.unchanged, 1);
        assert_eq!(
            section.value("control:flying_mode"),
            Some(Value::Integer(FLYING_MODE_FREE_FLIGHT))
        );
        assert_eq!(
            section.value("video:video_codec"),
            Some(Value::Integer(VIDEO_CODEC_H264_360P))
        );
    }

    #[test]
    fn test_nullable_text_starts_absent() {
        let mut section = standard_section(SectionConfig::default()).unwrap();
        assert_eq!(section.value("network:owner_mac"), Some(Value::Null));
        section.apply("network:owner_mac", "00:11:22:33:44:55").unwrap();
        assert_eq!(
            section.value("network:owner_mac"),
            Some(Value::Text("00:11:22:33:44:55".into()))
        );
    }
}
