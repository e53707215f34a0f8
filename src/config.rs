use std::env;
use std::path::PathBuf;

use anyhow::Context;

/// Raster normalization parameters
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Wider images are downscaled to this width, keeping aspect ratio
    pub max_width: u32,
    pub bilateral_window: u32,
    pub sigma_color: f32,
    pub sigma_spatial: f32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            max_width: 1200,
            bilateral_window: 9,
            sigma_color: 75.0,
            sigma_spatial: 75.0,
        }
    }
}

/// Button detection parameters. Size and aspect bounds are exclusive.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub canny_low: f32,
    pub canny_high: f32,
    /// Radius of the square closing element (1 = 3x3)
    pub closing_radius: u8,
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
    pub min_aspect: f32,
    pub max_aspect: f32,
    /// Average per-channel variance below which a region reads as a solid fill
    pub max_color_variance: f64,
    pub min_crop_side: u32,
    pub text_button_max_chars: usize,
    pub text_button_max_words: usize,
    pub dedup_overlap_x: i64,
    pub dedup_overlap_y: i64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            canny_low: 50.0,
            canny_high: 150.0,
            closing_radius: 1,
            min_width: 30,
            max_width: 1000,
            min_height: 10,
            max_height: 400,
            min_aspect: 1.2,
            max_aspect: 8.0,
            max_color_variance: 2000.0,
            min_crop_side: 4,
            text_button_max_chars: 20,
            text_button_max_words: 3,
            dedup_overlap_x: 10,
            dedup_overlap_y: 5,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub cta_prominence: f64,
    pub visual_hierarchy: f64,
    pub accessibility: f64,
    pub color_contrast: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            cta_prominence: 0.3,
            visual_hierarchy: 0.25,
            accessibility: 0.25,
            color_contrast: 0.2,
        }
    }
}

/// Designs clearing every threshold get at least `floor` overall
#[derive(Debug, Clone, Copy)]
pub struct BoostRule {
    pub cta_prominence: f64,
    pub visual_hierarchy: f64,
    pub accessibility: f64,
    pub color_contrast: f64,
    pub floor: u32,
}

impl Default for BoostRule {
    fn default() -> Self {
        Self {
            cta_prominence: 0.6,
            visual_hierarchy: 0.6,
            accessibility: 0.7,
            color_contrast: 0.65,
            floor: 80,
        }
    }
}

/// Scoring parameters
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    pub overall_min: u32,
    pub overall_max: u32,
    pub boost: BoostRule,
    pub image_canny_low: f32,
    pub image_canny_high: f32,
    pub min_image_side: u32,
    pub max_image_count: u32,
    pub min_touch_width: u32,
    pub min_touch_height: u32,
    pub small_text_height: u32,
    /// WCAG AA minimum contrast ratio for normal text
    pub min_contrast_ratio: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            overall_min: 45,
            overall_max: 95,
            boost: BoostRule::default(),
            image_canny_low: 100.0,
            image_canny_high: 200.0,
            min_image_side: 100,
            max_image_count: 5,
            min_touch_width: 44,
            min_touch_height: 30,
            small_text_height: 12,
            min_contrast_ratio: 4.5,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub cors_origins: Vec<String>,
    pub ocr_model_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_bytes: 16 * 1024 * 1024,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            ocr_model_dir: None,
        }
    }
}

impl ServerConfig {
    /// Load from `UXLENS_*` environment variables (and `.env` if present)
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        let host = env::var("UXLENS_HOST").unwrap_or(defaults.host);

        let port = match env::var("UXLENS_PORT") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("UXLENS_PORT is not a valid port: {value}"))?,
            Err(_) => defaults.port,
        };

        let max_upload_bytes = match env::var("UXLENS_MAX_UPLOAD_BYTES") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("UXLENS_MAX_UPLOAD_BYTES is not a byte count: {value}"))?,
            Err(_) => defaults.max_upload_bytes,
        };

        let cors_origins = env::var("UXLENS_CORS_ORIGINS")
            .ok()
            .map(|origins| parse_list(&origins))
            .unwrap_or(defaults.cors_origins);

        let ocr_model_dir = env::var("UXLENS_OCR_MODEL_DIR").ok().map(PathBuf::from);

        let config = Self {
            host,
            port,
            max_upload_bytes,
            cors_origins,
            ocr_model_dir,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_upload_bytes == 0 {
            anyhow::bail!("Upload limit must be greater than zero");
        }
        if self.host.trim().is_empty() {
            anyhow::bail!("Server host must not be empty");
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_trims_and_skips_blanks() {
        assert_eq!(
            parse_list(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn test_default_server_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn test_zero_upload_limit_is_rejected() {
        let config = ServerConfig {
            max_upload_bytes: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
