//! Hotspot registry: named regions of the room image.
//! Geometry is RELATIVE to the displayed background (0..1 on each axis), never
//! absolute surface pixels. Registry order is hit-test priority.

/// A hoverable / clickable region of the room.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Hotspot {
    pub name: String,
    pub rel_x: f64,
    pub rel_y: f64,
    pub rel_width: f64,
    pub rel_height: f64,
    pub message: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub link: Option<String>,
}

impl Hotspot {
    pub fn new(name: &str, rel_x: f64, rel_y: f64, rel_width: f64, rel_height: f64, message: &str) -> Self {
        Self {
            name: name.to_string(),
            rel_x,
            rel_y,
            rel_width,
            rel_height,
            message: message.to_string(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }

    /// True when the region stays inside the background image.
    pub fn fits_background(&self) -> bool {
        let axis_ok = |pos: f64, len: f64| pos >= 0.0 && len >= 0.0 && pos + len <= 1.0;
        axis_ok(self.rel_x, self.rel_width) && axis_ok(self.rel_y, self.rel_height)
    }
}

/// Ordered, immutable list of hotspots.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HotspotRegistry {
    hotspots: Vec<Hotspot>,
}

impl HotspotRegistry {
    pub fn new(hotspots: Vec<Hotspot>) -> Self {
        Self { hotspots }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hotspot> {
        self.hotspots.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Hotspot> {
        self.hotspots.get(index)
    }

    pub fn by_name(&self, name: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.name == name)
    }

    pub fn len(&self) -> usize {
        self.hotspots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotspots.is_empty()
    }
}

impl Default for HotspotRegistry {
    /// The shipped bedroom layout.
    fn default() -> Self {
        Self::new(vec![
            Hotspot::new("Macbook", 0.685, 0.47, 0.03, 0.05, "This is my lapytopy where I code and study!")
                .with_link("https://github.com/HermioneHacks"),
            Hotspot::new("bed", 0.31, 0.45, 0.1, 0.2, "My cozy bed...!"),
            Hotspot::new("bookshelf", 0.53, 0.25, 0.15, 0.08, "This is my bookshelf, where I keep my trinkets!"),
            Hotspot::new(
                "iPad",
                0.655,
                0.475,
                0.015,
                0.03,
                "This is my iPad where I watch my favorite shows and take notes!",
            ),
            Hotspot::new("turtle", 0.43, 0.50, 0.03, 0.03, "This is Sir Bartholomew Oswald van Beethoven the Third!")
                .with_link("https://www.ikea.com/us/en/p/blavingad-soft-toy-turtle-green-10532041/"),
            Hotspot::new("mango", 0.815, 0.43, 0.03, 0.055, "This is my bird Mango! Click to see more photos!")
                .with_link("mango-page.html"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_registry_names_unique() {
        let reg = HotspotRegistry::default();
        let mut seen = HashSet::new();
        for h in reg.iter() {
            assert!(seen.insert(h.name.as_str()), "duplicate hotspot '{}'", h.name);
        }
        assert_eq!(reg.len(), 6);
    }

    #[test]
    fn test_default_registry_fits_background() {
        for h in HotspotRegistry::default().iter() {
            assert!(h.fits_background(), "hotspot '{}' leaves the background", h.name);
            assert!(!h.message.is_empty());
        }
    }

    #[test]
    fn test_fits_background_rejects_overflow() {
        let h = Hotspot::new("wide", 0.95, 0.1, 0.1, 0.1, "too wide");
        assert!(!h.fits_background());
    }

    #[test]
    fn test_by_name_and_links() {
        let reg = HotspotRegistry::default();
        assert_eq!(reg.by_name("mango").and_then(|h| h.link.as_deref()), Some("mango-page.html"));
        assert!(reg.by_name("bed").is_some_and(|h| h.link.is_none()));
        assert!(reg.by_name("closet").is_none());
    }
}
