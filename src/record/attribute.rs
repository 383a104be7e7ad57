//! The fixed attribute vocabulary of a capability record.

use std::fmt;

/// Reserved key naming the parent record.
pub const PARENT_KEY: &str = "Parent";

/// One inheritable attribute of a capability record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Comment,
    Browser,
    BrowserType,
    BrowserBits,
    BrowserMaker,
    BrowserVersion,
    BrowserMajorVer,
    BrowserMinorVer,
    Platform,
    PlatformVersion,
    PlatformDescription,
    PlatformBits,
    PlatformMaker,
    DeviceType,
    DeviceName,
    DeviceCodeName,
    DeviceBrand,
    DeviceMaker,
    DevicePointingMethod,
    Crawler,
    Cookies,
    JavaScript,
    RenderingEngineName,
    RenderingEngineVersion,
    RenderingEngineMaker,
}

impl Attribute {
    /// Every attribute, in merge order.
    pub const ALL: [Attribute; 25] = [
        Attribute::Comment,
        Attribute::Browser,
        Attribute::BrowserType,
        Attribute::BrowserBits,
        Attribute::BrowserMaker,
        Attribute::BrowserVersion,
        Attribute::BrowserMajorVer,
        Attribute::BrowserMinorVer,
        Attribute::Platform,
        Attribute::PlatformVersion,
        Attribute::PlatformDescription,
        Attribute::PlatformBits,
        Attribute::PlatformMaker,
        Attribute::DeviceType,
        Attribute::DeviceName,
        Attribute::DeviceCodeName,
        Attribute::DeviceBrand,
        Attribute::DeviceMaker,
        Attribute::DevicePointingMethod,
        Attribute::Crawler,
        Attribute::Cookies,
        Attribute::JavaScript,
        Attribute::RenderingEngineName,
        Attribute::RenderingEngineVersion,
        Attribute::RenderingEngineMaker,
    ];

    /// Key used for this attribute in the browscap dataset.
    pub fn key(self) -> &'static str {
        match self {
            Attribute::Comment => "Comment",
            Attribute::Browser => "Browser",
            Attribute::BrowserType => "Browser_Type",
            Attribute::BrowserBits => "Browser_Bits",
            Attribute::BrowserMaker => "Browser_Maker",
            Attribute::BrowserVersion => "Version",
            Attribute::BrowserMajorVer => "MajorVer",
            Attribute::BrowserMinorVer => "MinorVer",
            Attribute::Platform => "Platform",
            Attribute::PlatformVersion => "Platform_Version",
            Attribute::PlatformDescription => "Platform_Description",
            Attribute::PlatformBits => "Platform_Bits",
            Attribute::PlatformMaker => "Platform_Maker",
            Attribute::DeviceType => "Device_Type",
            Attribute::DeviceName => "Device_Name",
            Attribute::DeviceCodeName => "Device_Code_Name",
            Attribute::DeviceBrand => "Device_Brand_Name",
            Attribute::DeviceMaker => "Device_Maker",
            Attribute::DevicePointingMethod => "Device_Pointing_Method",
            Attribute::Crawler => "Crawler",
            Attribute::Cookies => "Cookies",
            Attribute::JavaScript => "JavaScript",
            Attribute::RenderingEngineName => "RenderingEngine_Name",
            Attribute::RenderingEngineVersion => "RenderingEngine_Version",
            Attribute::RenderingEngineMaker => "RenderingEngine_Maker",
        }
    }

    /// Inverse of [`Attribute::key`]. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|attr| attr.key() == key)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
