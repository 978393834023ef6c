//! Static catalog and profile data
//!
//! Offerings are plain data. How they look is decided by the templates in
//! `views`, which resolve icons and accents by name.

use serde::Serialize;

/// Named graphic asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Code,
    Instagram,
    Lock,
    User,
    Facebook,
    Youtube,
}

impl Icon {
    pub const ALL: [Icon; 6] = [
        Icon::Code,
        Icon::Instagram,
        Icon::Lock,
        Icon::User,
        Icon::Facebook,
        Icon::Youtube,
    ];

    /// Resolve an asset name back to its icon
    pub fn from_asset(name: &str) -> Option<Icon> {
        Self::ALL.into_iter().find(|icon| icon.asset() == name)
    }

    /// Asset name under `/static/icons/`
    pub fn asset(self) -> &'static str {
        match self {
            Icon::Code => "code.svg",
            Icon::Instagram => "instagram.svg",
            Icon::Lock => "lock.svg",
            Icon::User => "user.svg",
            Icon::Facebook => "facebook.svg",
            Icon::Youtube => "youtube.svg",
        }
    }
}

/// Highlight colour used by the detail panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Pink,
    Purple,
    Blue,
    Green,
}

/// Detail panel content shown on the product step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferingContent {
    pub summary: &'static str,
    pub highlights: Vec<&'static str>,
    pub accent: Accent,
}

/// A single listed service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Offering {
    pub id: u32,
    pub name: &'static str,
    pub icon: Icon,
    pub description: &'static str,
    pub content: OfferingContent,
}

/// Fixed, ordered list of offerings
#[derive(Debug, Clone)]
pub struct Catalog {
    offerings: Vec<Offering>,
}

impl Catalog {
    pub fn new(offerings: Vec<Offering>) -> Self {
        Self { offerings }
    }

    /// The offerings listed on the profile page
    pub fn builtin() -> Self {
        Self::new(vec![
            Offering {
                id: 1,
                name: "Dapp Script",
                icon: Icon::Code,
                description: "Fully functional decentralized application scripts for blockchain integration",
                content: OfferingContent {
                    summary: "Our DApp scripts are optimized for performance and security on multiple blockchains.",
                    highlights: vec!["Solidity Based", "Multi-chain Support"],
                    accent: Accent::Pink,
                },
            },
            Offering {
                id: 2,
                name: "Vinance Script",
                icon: Icon::Instagram,
                description: "Premium finance and trading scripts for crypto markets",
                content: OfferingContent {
                    summary: "Advanced algorithms for cryptocurrency trading and financial operations.",
                    highlights: vec!["Automated Trading"],
                    accent: Accent::Purple,
                },
            },
            Offering {
                id: 3,
                name: "Link Encrypter",
                icon: Icon::Lock,
                description: "Secure your sensitive links with our military-grade encryption",
                content: OfferingContent {
                    summary: "Protect your important links with end-to-end encryption technology.",
                    highlights: vec!["256-bit Encryption", "Time-limited Links"],
                    accent: Accent::Blue,
                },
            },
            Offering {
                id: 4,
                name: "Cloning Service",
                icon: Icon::Code,
                description: "Professional website and application cloning services",
                content: OfferingContent {
                    summary: "Get exact replicas of websites and applications with our advanced cloning techniques.",
                    highlights: vec!["1:1 Exact Replica"],
                    accent: Accent::Green,
                },
            },
            Offering {
                id: 5,
                name: "Personal Hire",
                icon: Icon::User,
                description: "Hire our experts for your custom development needs",
                content: OfferingContent {
                    summary: "Get personalized development services from our team of experienced developers.",
                    highlights: vec!["Custom Development"],
                    accent: Accent::Purple,
                },
            },
        ])
    }

    pub fn get(&self, id: u32) -> Option<&Offering> {
        self.offerings.iter().find(|offering| offering.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Offering> {
        self.offerings.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub icon: Icon,
    pub href: &'static str,
}

/// Page chrome around the catalog
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub display_name: &'static str,
    pub tagline: &'static str,
    pub avatar_initial: char,
    pub playlist_label: &'static str,
    pub section_heading: &'static str,
    pub social_links: Vec<SocialLink>,
    pub footer_brand: &'static str,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            display_name: "Zohn Doe",
            tagline: "Welcome to my profile",
            avatar_initial: 'Z',
            playlist_label: "My playlist",
            section_heading: "Services",
            social_links: vec![
                SocialLink { icon: Icon::Instagram, href: "#" },
                SocialLink { icon: Icon::Facebook, href: "#" },
                SocialLink { icon: Icon::Youtube, href: "#" },
            ],
            footer_brand: "CRYPTLINK",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_catalog_keeps_display_order() {
        let catalog = Catalog::builtin();
        let names: Vec<_> = catalog.iter().map(|o| o.name).collect();
        assert_eq!(
            names,
            vec![
                "Dapp Script",
                "Vinance Script",
                "Link Encrypter",
                "Cloning Service",
                "Personal Hire",
            ]
        );
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get(3).map(|o| o.name), Some("Link Encrypter"));
        assert!(catalog.get(42).is_none());
    }

    #[test]
    fn every_icon_resolves_to_an_svg_asset() {
        let profile = Profile::default();
        let icons = Catalog::builtin()
            .iter()
            .map(|o| o.icon)
            .chain(profile.social_links.iter().map(|l| l.icon))
            .collect::<Vec<_>>();
        assert!(icons.iter().all(|icon| icon.asset().ends_with(".svg")));
        assert!(icons.contains(&Icon::Facebook));
    }

    #[test]
    fn asset_lookup_round_trips() {
        for icon in Icon::ALL {
            assert_eq!(Icon::from_asset(icon.asset()), Some(icon));
        }
        assert_eq!(Icon::from_asset("twitter.svg"), None);
    }
}
