//! Page configuration.
//!
//! Everything the page shows and every motion constant it uses lives here as
//! plain data. Defaults reproduce the stock DesignPro layout; a TOML file can
//! override any subset:
//!
//! ```toml
//! [content]
//! brand = "Acme Studio"
//!
//! [motion.scroll]
//! hide_threshold = 80.0
//! ```
//!
//! The file is looked up at `$SPARK_PAGE_CONFIG`, falling back to
//! `spark-page.toml` in the working directory.

use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;

use crate::animation::{Easing, MotionValues, Transition};
use crate::error::{PageError, Result};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SPARK_PAGE_CONFIG";

/// Config file used when the environment variable is unset.
pub const DEFAULT_CONFIG_FILE: &str = "spark-page.toml";

// =============================================================================
// ROOT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub content: ContentConfig,
    pub motion: MotionConfig,
    pub preview: PreviewConfig,
}

impl PageConfig {
    /// Parse a config file. Missing keys keep their defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| PageError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| PageError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse `path` if it exists. A missing file is `Ok(None)`.
    ///
    /// Usable before tracing is set up: nothing is logged.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::from_path(path).map(Some)
    }

    /// Load the config file if one exists.
    ///
    /// Returns `None` when there is no file, or when it cannot be read or
    /// parsed (logged as a warning).
    pub fn load() -> Option<Self> {
        let path = Self::path();
        match Self::load_from(&path) {
            Ok(Some(config)) => {
                tracing::info!(path = %path.display(), "loaded page config");
                Some(config)
            }
            Ok(None) => {
                tracing::debug!(path = %path.display(), "no page config, using defaults");
                None
            }
            Err(err) => {
                tracing::warn!("{err}");
                None
            }
        }
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Resolved config file location.
    pub fn path() -> PathBuf {
        env::var_os(CONFIG_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}

// =============================================================================
// CONTENT
// =============================================================================

/// Static copy fed into the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub brand: String,
    pub nav: Vec<String>,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_cta: String,
    pub services_heading: String,
    pub services: Vec<String>,
    pub service_blurb: String,
    pub service_link: String,
    pub projects_heading: String,
    pub projects: Vec<String>,
    pub project_blurb: String,
    pub project_link: String,
    pub contact_heading: String,
    pub contact_fields: Vec<FormField>,
    pub contact_submit: String,
    pub copyright: String,
    pub promo_links: Vec<PromoLink>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            brand: "DesignPro".to_string(),
            nav: ["Home", "Services", "Projects", "Contact"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            hero_title: "Elevate Your Brand with Modern Design".to_string(),
            hero_subtitle: "Transforming ideas into visually stunning realities".to_string(),
            hero_cta: "Get Started".to_string(),
            services_heading: "Our Services".to_string(),
            services: ["UI/UX Design", "Brand Identity", "Web Development"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            service_blurb: "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod \
                            tempor incididunt ut labore et dolore magna aliqua."
                .to_string(),
            service_link: "Learn More ›".to_string(),
            projects_heading: "Featured Projects".to_string(),
            projects: (1..=6).map(|i| format!("Project {i}")).collect(),
            project_blurb: "A brief description of the project and its impact.".to_string(),
            project_link: "View Project →".to_string(),
            contact_heading: "Get in Touch".to_string(),
            contact_fields: vec![
                FormField::line("Your Name"),
                FormField::line("Your Email"),
                FormField::area("Your Message", 4),
            ],
            contact_submit: "Send Message".to_string(),
            copyright: "© 2023 DesignPro. All rights reserved.".to_string(),
            promo_links: PromoLink::defaults(),
        }
    }
}

/// A presentational form field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FormField {
    pub placeholder: String,
    /// Visible text rows (1 for single-line inputs).
    #[serde(default = "default_rows")]
    pub rows: u16,
}

fn default_rows() -> u16 {
    1
}

impl FormField {
    pub fn line(placeholder: &str) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            rows: 1,
        }
    }

    pub fn area(placeholder: &str, rows: u16) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            rows: rows.max(1),
        }
    }
}

/// Promotional link card shown in the footer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PromoLink {
    pub title: String,
    pub href: String,
    pub description: String,
}

impl PromoLink {
    fn defaults() -> Vec<Self> {
        let card = |title: &str, href: &str, description: &str| Self {
            title: title.to_string(),
            href: href.to_string(),
            description: description.to_string(),
        };
        vec![
            card(
                "Docs",
                "https://nextjs.org/docs",
                "Find in-depth information about Next.js features and API.",
            ),
            card(
                "Learn",
                "https://nextjs.org/learn",
                "Learn about Next.js in an interactive course with quizzes!",
            ),
            card(
                "Templates",
                "https://vercel.com/templates?framework=next.js",
                "Explore starter templates for Next.js.",
            ),
            card(
                "Deploy",
                "https://vercel.com/new",
                "Instantly deploy your Next.js site to a shareable URL with Vercel.",
            ),
        ]
    }
}

// =============================================================================
// MOTION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    pub stagger: StaggerConfig,
    pub flip: FlipConfig,
    pub gesture: GestureConfig,
    pub entrance: EntranceConfig,
}

/// Header behavior on scroll.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Position above which the page counts as scrolled.
    pub scrolled_threshold: f64,
    /// Movement since the last recorded position needed to show/hide the header.
    pub hide_threshold: f64,
    /// Header y offset while hidden.
    pub hidden_offset: f32,
    pub header: Transition,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: 20.0,
            hide_threshold: 50.0,
            hidden_offset: -100.0,
            header: Transition::tween(0.3),
        }
    }
}

/// Viewport reveal thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of a section that must be visible to fire its reveal (0.0 - 1.0).
    pub amount: f32,
    /// Same for in-view elements; 0.0 means any visible pixel.
    pub in_view_amount: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            amount: 0.2,
            in_view_amount: 0.0,
        }
    }
}

/// Per-character stagger for animated text.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct StaggerConfig {
    pub base_delay: f32,
    pub delay_multiplier: f32,
    pub stagger: f32,
    pub hidden: MotionValues,
    pub letter: Transition,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            base_delay: 0.04,
            delay_multiplier: 1.0,
            stagger: 0.03,
            hidden: MotionValues::REST.opacity(0.0).x(-20.0).y(10.0),
            letter: Transition::spring(100.0, 12.0),
        }
    }
}

/// Hover flip and tap pulse for nav links.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlipConfig {
    pub flip_degrees: f32,
    pub flip: Transition,
    pub layer_fade: Transition,
    pub tap_scale: f32,
    pub tap_rotate: f32,
    pub tap: Transition,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            flip_degrees: 180.0,
            flip: Transition::spring(500.0, 25.0),
            layer_fade: Transition::tween(0.3).with_ease(Easing::Linear),
            tap_scale: 0.95,
            tap_rotate: 5.0,
            tap: Transition::tween(0.15),
        }
    }
}

/// Hover / tap / focus variants of one kind of element.
///
/// A `None` variant leaves that gesture unanimated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GestureTargets {
    pub hover: Option<MotionValues>,
    pub tap: Option<MotionValues>,
    pub focus: Option<MotionValues>,
}

impl GestureTargets {
    pub const NONE: Self = Self {
        hover: None,
        tap: None,
        focus: None,
    };

    pub const fn hover(mut self, values: MotionValues) -> Self {
        self.hover = Some(values);
        self
    }

    pub const fn tap(mut self, values: MotionValues) -> Self {
        self.tap = Some(values);
        self
    }

    pub const fn focus(mut self, values: MotionValues) -> Self {
        self.focus = Some(values);
        self
    }
}

/// Gesture feedback on buttons, cards, links and form fields.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub transition: Transition,
    /// Menu toggle, close button and overlay items.
    pub menu_button: GestureTargets,
    /// Hero call to action and form submit.
    pub button: GestureTargets,
    pub service_card: GestureTargets,
    pub project_card: GestureTargets,
    /// Image inside a project card; follows the card's hover.
    pub project_image: GestureTargets,
    /// "Learn More" / "View Project" links.
    pub card_link: GestureTargets,
    pub field: GestureTargets,
}

impl Default for GestureConfig {
    fn default() -> Self {
        let press = MotionValues::REST.scale(0.95);
        Self {
            transition: Transition::spring(500.0, 25.0),
            menu_button: GestureTargets::NONE
                .hover(MotionValues::REST.scale(1.1))
                .tap(press),
            button: GestureTargets::NONE
                .hover(MotionValues::REST.scale(1.05))
                .tap(press),
            service_card: GestureTargets::NONE.hover(MotionValues::REST.scale(1.05).rotate(1.0)),
            project_card: GestureTargets::NONE.hover(MotionValues::REST.y(-10.0).scale(1.03)),
            project_image: GestureTargets::NONE.hover(MotionValues::REST.scale(1.1)),
            card_link: GestureTargets::NONE.hover(MotionValues::REST.x(5.0)),
            field: GestureTargets::NONE.focus(MotionValues::REST.scale(1.02)),
        }
    }
}

/// Entrance timings for the static page elements.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EntranceConfig {
    pub brand: Transition,
    pub hero: Transition,
    pub hero_subtitle: Transition,
    pub hero_image: Transition,
    pub hero_float: Transition,
    pub heading: Transition,
    pub card: Transition,
    /// Extra delay per card index.
    pub card_stagger: f32,
    pub menu_fade: Transition,
    pub menu_item: Transition,
    /// Extra delay per menu item index.
    pub menu_item_stagger: f32,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            brand: Transition::tween(0.5),
            hero: Transition::tween(0.8),
            hero_subtitle: Transition::tween(0.8).with_delay(0.5),
            hero_image: Transition::tween(0.8).with_delay(0.2),
            // 0 -> peak -> 0 over 5s, mirrored forever
            hero_float: Transition::tween(2.5).repeat_reverse(),
            heading: Transition::tween(0.5),
            card: Transition::tween(0.5),
            card_stagger: 0.1,
            menu_fade: Transition::tween(0.3),
            menu_item: Transition::spring(200.0, 20.0),
            menu_item_stagger: 0.1,
        }
    }
}

// =============================================================================
// PREVIEW
// =============================================================================

/// Terminal preview settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Page pixels per terminal column.
    pub px_per_col: f32,
    /// Page pixels per terminal row (also the text line height).
    pub px_per_row: f32,
    /// Pixels scrolled per mouse wheel notch or arrow key.
    pub wheel_step: f64,
    pub fps: u16,
    /// Where to write logs; logging is off when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            px_per_col: 8.0,
            px_per_row: 16.0,
            wheel_step: 40.0,
            fps: 60,
            log_file: None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_layout_constants() {
        let config = PageConfig::default();

        assert_eq!(config.motion.scroll.scrolled_threshold, 20.0);
        assert_eq!(config.motion.scroll.hide_threshold, 50.0);
        assert_eq!(config.motion.reveal.amount, 0.2);
        assert_eq!(config.motion.reveal.in_view_amount, 0.0);
        assert_eq!(config.motion.flip.flip, Transition::spring(500.0, 25.0));
        assert_eq!(config.motion.stagger.base_delay, 0.04);
        assert_eq!(config.motion.stagger.stagger, 0.03);
        assert_eq!(config.content.nav.len(), 4);
        assert_eq!(config.content.projects.len(), 6);
        assert_eq!(config.content.promo_links.len(), 4);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: PageConfig = toml::from_str(
            r#"
            [content]
            brand = "Acme"

            [motion.scroll]
            hide_threshold = 80.0
            "#,
        )
        .unwrap();

        assert_eq!(config.content.brand, "Acme");
        assert_eq!(config.content.nav.len(), 4);
        assert_eq!(config.motion.scroll.hide_threshold, 80.0);
        assert_eq!(config.motion.scroll.scrolled_threshold, 20.0);
    }

    #[test]
    fn test_transition_override() {
        let config: PageConfig = toml::from_str(
            r#"
            [motion.stagger.letter]
            type = "tween"
            duration = 0.2
            "#,
        )
        .unwrap();

        assert_eq!(config.motion.stagger.letter, Transition::tween(0.2));
    }

    #[test]
    fn test_form_field_rows_default() {
        let field: FormField = toml::from_str(r#"placeholder = "Phone""#).unwrap();
        assert_eq!(field.rows, 1);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = PageConfig::from_path(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, PageError::ReadConfig { .. }));
    }

    #[test]
    fn test_from_path_invalid_toml() {
        let path = env::temp_dir().join(format!("spark-page-bad-{}.toml", std::process::id()));
        fs::write(&path, "content = [not toml").unwrap();

        let err = PageConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, PageError::ParseConfig { .. }));
        assert!(err.to_string().contains("failed to parse config"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_from_reports_bad_file() {
        assert_eq!(PageConfig::load_from(Path::new("/definitely/not/here.toml")).unwrap(), None);

        let path = env::temp_dir().join(format!("spark-page-load-{}.toml", std::process::id()));
        fs::write(&path, "[motion.scroll]\nhide_threshold = \"far\"").unwrap();
        let err = PageConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, PageError::ParseConfig { .. }));

        fs::write(&path, "[content]\nbrand = \"Acme\"").unwrap();
        let config = PageConfig::load_from(&path).unwrap().expect("config");
        assert_eq!(config.content.brand, "Acme");

        let _ = fs::remove_file(&path);
    }
}
