//! Attribute set of a capability record and its derived predicates.

use serde::Serialize;

use crate::record::attribute::Attribute;

/// Descriptive attributes of a user agent. Empty string means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub comment: String,

    pub browser: String,
    /// Browser, Application, Bot/Crawler, Useragent Anonymizer, Offline Browser,
    /// Multimedia Player, Library, Feed Reader, Email Client or unknown.
    pub browser_type: String,
    pub browser_bits: String,
    pub browser_maker: String,
    pub browser_version: String,
    pub browser_major_ver: String,
    pub browser_minor_ver: String,

    pub platform: String,
    pub platform_version: String,
    pub platform_description: String,
    pub platform_bits: String,
    pub platform_maker: String,

    /// Mobile Phone, Mobile Device, Tablet, Desktop, TV Device, Console,
    /// FonePad, Ebook Reader, Car Entertainment System or unknown.
    pub device_type: String,
    pub device_name: String,
    pub device_code_name: String,
    pub device_brand: String,
    pub device_maker: String,
    pub device_pointing_method: String,

    pub crawler: String,
    pub cookies: String,
    pub javascript: String,

    pub rendering_engine_name: String,
    pub rendering_engine_version: String,
    pub rendering_engine_maker: String,
}

impl Capabilities {
    pub fn get(&self, attr: Attribute) -> &str {
        match attr {
            Attribute::Comment => &self.comment,
            Attribute::Browser => &self.browser,
            Attribute::BrowserType => &self.browser_type,
            Attribute::BrowserBits => &self.browser_bits,
            Attribute::BrowserMaker => &self.browser_maker,
            Attribute::BrowserVersion => &self.browser_version,
            Attribute::BrowserMajorVer => &self.browser_major_ver,
            Attribute::BrowserMinorVer => &self.browser_minor_ver,
            Attribute::Platform => &self.platform,
            Attribute::PlatformVersion => &self.platform_version,
            Attribute::PlatformDescription => &self.platform_description,
            Attribute::PlatformBits => &self.platform_bits,
            Attribute::PlatformMaker => &self.platform_maker,
            Attribute::DeviceType => &self.device_type,
            Attribute::DeviceName => &self.device_name,
            Attribute::DeviceCodeName => &self.device_code_name,
            Attribute::DeviceBrand => &self.device_brand,
            Attribute::DeviceMaker => &self.device_maker,
            Attribute::DevicePointingMethod => &self.device_pointing_method,
            Attribute::Crawler => &self.crawler,
            Attribute::Cookies => &self.cookies,
            Attribute::JavaScript => &self.javascript,
            Attribute::RenderingEngineName => &self.rendering_engine_name,
            Attribute::RenderingEngineVersion => &self.rendering_engine_version,
            Attribute::RenderingEngineMaker => &self.rendering_engine_maker,
        }
    }

    fn slot_mut(&mut self, attr: Attribute) -> &mut String {
        match attr {
            Attribute::Comment => &mut self.comment,
            Attribute::Browser => &mut self.browser,
            Attribute::BrowserType => &mut self.browser_type,
            Attribute::BrowserBits => &mut self.browser_bits,
            Attribute::BrowserMaker => &mut self.browser_maker,
            Attribute::BrowserVersion => &mut self.browser_version,
            Attribute::BrowserMajorVer => &mut self.browser_major_ver,
            Attribute::BrowserMinorVer => &mut self.browser_minor_ver,
            Attribute::Platform => &mut self.platform,
            Attribute::PlatformVersion => &mut self.platform_version,
            Attribute::PlatformDescription => &mut self.platform_description,
            Attribute::PlatformBits => &mut self.platform_bits,
            Attribute::PlatformMaker => &mut self.platform_maker,
            Attribute::DeviceType => &mut self.device_type,
            Attribute::DeviceName => &mut self.device_name,
            Attribute::DeviceCodeName => &mut self.device_code_name,
            Attribute::DeviceBrand => &mut self.device_brand,
            Attribute::DeviceMaker => &mut self.device_maker,
            Attribute::DevicePointingMethod => &mut self.device_pointing_method,
            Attribute::Crawler => &mut self.crawler,
            Attribute::Cookies => &mut self.cookies,
            Attribute::JavaScript => &mut self.javascript,
            Attribute::RenderingEngineName => &mut self.rendering_engine_name,
            Attribute::RenderingEngineVersion => &mut self.rendering_engine_version,
            Attribute::RenderingEngineMaker => &mut self.rendering_engine_maker,
        }
    }

    pub fn set(&mut self, attr: Attribute, value: impl Into<String>) {
        *self.slot_mut(attr) = value.into();
    }

    /// Fill every empty attribute for which `ancestor` has a value.
    ///
    /// Returns the number of attributes filled.
    pub fn inherit_from(&mut self, ancestor: &Capabilities) -> usize {
        let mut filled = 0;
        for attr in Attribute::ALL {
            let inherited = ancestor.get(attr);
            if inherited.is_empty() {
                continue;
            }
            let slot = self.slot_mut(attr);
            if slot.is_empty() {
                slot.push_str(inherited);
                filled += 1;
            }
        }
        filled
    }

    /// True once no attribute is left empty.
    pub fn is_complete(&self) -> bool {
        Attribute::ALL.iter().all(|&attr| !self.get(attr).is_empty())
    }

    /// Lower-cased platform with Windows and macOS variants collapsed.
    pub fn platform_short(&self) -> String {
        let short = self.platform.to_lowercase();
        if short.starts_with("win") {
            "win".to_string()
        } else if short.starts_with("mac") {
            "mac".to_string()
        } else {
            short
        }
    }

    pub fn is_crawler(&self) -> bool {
        self.browser_type == "Bot/Crawler" || self.crawler == "true"
    }

    pub fn is_mobile(&self) -> bool {
        matches!(self.device_type.as_str(), "Mobile Phone" | "Mobile Device")
    }

    pub fn is_tablet(&self) -> bool {
        matches!(self.device_type.as_str(), "Tablet" | "FonePad" | "Ebook Reader")
    }

    pub fn is_desktop(&self) -> bool {
        self.device_type == "Desktop"
    }

    pub fn is_console(&self) -> bool {
        self.device_type == "Console"
    }

    pub fn is_tv(&self) -> bool {
        self.device_type == "TV Device"
    }

    pub fn is_android(&self) -> bool {
        self.platform == "Android"
    }

    pub fn is_iphone(&self) -> bool {
        self.platform == "iOS" && self.device_code_name == "iPhone"
    }

    pub fn is_ipad(&self) -> bool {
        self.platform == "iOS" && self.device_code_name == "iPad"
    }

    pub fn is_win_phone(&self) -> bool {
        self.platform.contains("WinPhone") || self.platform == "WinMobile"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(pairs: &[(Attribute, &str)]) -> Capabilities {
        let mut caps = Capabilities::default();
        for (attr, value) in pairs {
            caps.set(*attr, *value);
        }
        caps
    }

    #[test]
    fn test_get_and_set_cover_every_attribute() {
        let mut caps = Capabilities::default();
        for attr in Attribute::ALL {
            caps.set(attr, attr.key());
        }
        for attr in Attribute::ALL {
            assert_eq!(caps.get(attr), attr.key());
        }
        assert!(caps.is_complete());
    }

    #[test]
    fn test_inherit_fills_only_empty() {
        let mut child = caps(&[(Attribute::BrowserVersion, "37.0")]);
        let parent = caps(&[
            (Attribute::BrowserVersion, "0.0"),
            (Attribute::Browser, "Chrome"),
        ]);

        assert_eq!(child.inherit_from(&parent), 1);
        assert_eq!(child.browser_version, "37.0");
        assert_eq!(child.browser, "Chrome");
    }

    #[test]
    fn test_inherit_ignores_empty_ancestor_values() {
        let mut child = Capabilities::default();
        assert_eq!(child.inherit_from(&Capabilities::default()), 0);
        assert_eq!(child, Capabilities::default());
    }

    #[test]
    fn test_device_predicates() {
        assert!(caps(&[(Attribute::DeviceType, "Mobile Phone")]).is_mobile());
        assert!(caps(&[(Attribute::DeviceType, "Mobile Device")]).is_mobile());
        assert!(caps(&[(Attribute::DeviceType, "FonePad")]).is_tablet());
        assert!(caps(&[(Attribute::DeviceType, "Ebook Reader")]).is_tablet());
        assert!(caps(&[(Attribute::DeviceType, "Desktop")]).is_desktop());
        assert!(caps(&[(Attribute::DeviceType, "Console")]).is_console());
        assert!(caps(&[(Attribute::DeviceType, "TV Device")]).is_tv());
        assert!(!caps(&[(Attribute::DeviceType, "Tablet")]).is_mobile());
    }

    #[test]
    fn test_crawler_predicate() {
        assert!(caps(&[(Attribute::BrowserType, "Bot/Crawler")]).is_crawler());
        assert!(caps(&[(Attribute::Crawler, "true")]).is_crawler());
        assert!(!caps(&[(Attribute::Crawler, "false")]).is_crawler());
    }

    #[test]
    fn test_platform_predicates() {
        let iphone = caps(&[
            (Attribute::Platform, "iOS"),
            (Attribute::DeviceCodeName, "iPhone"),
        ]);
        assert!(iphone.is_iphone());
        assert!(!iphone.is_ipad());

        assert!(caps(&[(Attribute::Platform, "Android")]).is_android());
        assert!(caps(&[(Attribute::Platform, "WinPhone8.1")]).is_win_phone());
        assert!(caps(&[(Attribute::Platform, "WinMobile")]).is_win_phone());
    }

    #[test]
    fn test_platform_short() {
        assert_eq!(caps(&[(Attribute::Platform, "Win10")]).platform_short(), "win");
        assert_eq!(caps(&[(Attribute::Platform, "MacOSX")]).platform_short(), "mac");
        assert_eq!(caps(&[(Attribute::Platform, "Linux")]).platform_short(), "linux");
        assert_eq!(Capabilities::default().platform_short(), "");
    }
}
