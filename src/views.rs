//! HTML rendering for the profile page and the order wizard
//!
//! Templates are compiled into the binary. Offerings and profile data are
//! turned into small view structs here so templates never need to know how
//! icons are resolved.

use minijinja::{Environment, context};
use serde::Serialize;

use crate::catalog::{Catalog, Icon, Profile};
use crate::models::{PaymentMethod, WizardView};

mod embedded {
    pub const PROFILE: &str = include_str!("../templates/profile.html");
    pub const WIZARD: &str = include_str!("../templates/wizard.html");
}

const SVG_OPEN: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#;

/// Inner SVG markup for each icon
fn icon_body(icon: Icon) -> &'static str {
    match icon {
        Icon::Code => r#"<polyline points="16 18 22 12 16 6"/><polyline points="8 6 2 12 8 18"/>"#,
        Icon::Instagram => {
            r#"<rect x="2" y="2" width="20" height="20" rx="5" ry="5"/><path d="M16 11.37A4 4 0 1 1 12.63 8 4 4 0 0 1 16 11.37z"/><line x1="17.5" y1="6.5" x2="17.51" y2="6.5"/>"#
        }
        Icon::Lock => {
            r#"<rect x="3" y="11" width="18" height="11" rx="2" ry="2"/><path d="M7 11V7a5 5 0 0 1 10 0v4"/>"#
        }
        Icon::User => {
            r#"<path d="M19 21v-2a4 4 0 0 0-4-4H9a4 4 0 0 0-4 4v2"/><circle cx="12" cy="7" r="4"/>"#
        }
        Icon::Facebook => {
            r#"<path d="M18 2h-3a5 5 0 0 0-5 5v3H7v4h3v8h4v-8h3l1-4h-4V7a1 1 0 0 1 1-1h3z"/>"#
        }
        Icon::Youtube => {
            r#"<path d="M22.54 6.42a2.78 2.78 0 0 0-1.94-2C18.88 4 12 4 12 4s-6.88 0-8.6.46a2.78 2.78 0 0 0-1.94 2A29 29 0 0 0 1 11.75a29 29 0 0 0 .46 5.33A2.78 2.78 0 0 0 3.4 19c1.72.46 8.6.46 8.6.46s6.88 0 8.6-.46a2.78 2.78 0 0 0 1.94-2 29 29 0 0 0 .46-5.25 29 29 0 0 0-.46-5.33z"/><polygon points="9.75 15.02 15.5 11.75 9.75 8.48 9.75 15.02"/>"#
        }
    }
}

/// Complete SVG document for an icon
pub fn icon_svg(icon: Icon) -> String {
    format!("{SVG_OPEN}{}</svg>", icon_body(icon))
}

#[derive(Serialize)]
struct OfferingCard<'a> {
    id: u32,
    name: &'a str,
    description: &'a str,
    icon_asset: &'static str,
}

#[derive(Serialize)]
struct SocialLinkView<'a> {
    href: &'a str,
    icon: Icon,
    icon_asset: &'static str,
}

#[derive(Serialize)]
struct PaymentOption {
    tag: &'static str,
    label: &'static str,
}

pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("profile.html", embedded::PROFILE)?;
    env.add_template("wizard.html", embedded::WIZARD)?;
    Ok(env)
}

/// Render the full page, with the wizard dialog when one is open
pub fn render_page(
    env: &Environment<'_>,
    profile: &Profile,
    catalog: &Catalog,
    wizard: Option<&WizardView>,
) -> Result<String, minijinja::Error> {
    let offerings: Vec<_> = catalog
        .iter()
        .map(|offering| OfferingCard {
            id: offering.id,
            name: offering.name,
            description: offering.description,
            icon_asset: offering.icon.asset(),
        })
        .collect();
    let social_links: Vec<_> = profile
        .social_links
        .iter()
        .map(|link| SocialLinkView {
            href: link.href,
            icon: link.icon,
            icon_asset: link.icon.asset(),
        })
        .collect();
    let payment_methods: Vec<_> = PaymentMethod::ALL
        .iter()
        .map(|method| PaymentOption {
            tag: method.tag(),
            label: method.label(),
        })
        .collect();

    env.get_template("profile.html")?.render(context! {
        profile => profile,
        offerings => offerings,
        social_links => social_links,
        payment_methods => payment_methods,
        wizard => wizard,
    })
}
