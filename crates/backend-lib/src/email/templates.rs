// ============================
// crates/backend-lib/src/email/templates.rs
// ============================
//! Email template catalog and rendering.

use std::collections::HashMap;

/// A renderable email template
#[derive(Debug, Clone)]
pub struct EmailTemplate {
    pub subject: String,
    pub content: String,
}

/// Catalog of templates, looked up by normalized key.
///
/// Keys are lowercased and stripped of whitespace before storage and
/// lookup, so `"EmailVerify-Token-Created "` and
/// `"emailverify-token-created"` address the same template.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: HashMap<String, EmailTemplate>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with the three templates the auth flows send
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        catalog.register(
            super::TEMPLATE_VERIFY_CREATED,
            "Verify your email address for {{app_name}}",
            "Hi {{name}},\n\n\
             Welcome to {{app_name}}! Enter this code to verify your email \
             address:\n\n\
             {{token}}\n\n\
             If you did not create an account with {{email}}, you can ignore \
             this message.\n\n\
             {{app_name}} | {{app_url}} | (c) {{copyright_year}}\n",
        );

        catalog.register(
            super::TEMPLATE_RESET_CREATED,
            "Reset your {{app_name}} password",
            "Hi {{name}},\n\n\
             A password reset was requested for {{email}}. Enter this code to \
             choose a new password:\n\n\
             {{token}}\n\n\
             If you did not request a reset, you can ignore this message and \
             your password will stay unchanged.\n\n\
             {{app_name}} | {{app_url}} | (c) {{copyright_year}}\n",
        );

        catalog.register(
            super::TEMPLATE_RESET_DONE,
            "Your {{app_name}} password was changed",
            "Hi {{name}},\n\n\
             The password for {{email}} was just changed. If this was not \
             you, contact support straight away.\n\n\
             {{app_name}} | {{app_url}} | (c) {{copyright_year}}\n",
        );

        catalog
    }

    /// Add or replace a template
    pub fn register(&mut self, key: &str, subject: &str, content: &str) {
        self.templates.insert(
            normalize_key(key),
            EmailTemplate {
                subject: subject.to_string(),
                content: content.to_string(),
            },
        );
    }

    /// Look up a template by key
    pub fn get(&self, key: &str) -> Option<&EmailTemplate> {
        self.templates.get(&normalize_key(key))
    }
}

fn normalize_key(key: &str) -> String {
    key.to_lowercase().split_whitespace().collect()
}

/// Substitute `{{key}}` placeholders from the data map.
///
/// Placeholders with no matching key are left in place.
pub fn render(template: &str, data: &HashMap<String, String>) -> String {
    let mut out = template.to_string();
    for (key, value) in data {
        out = out.replace(&format!("{{{{{key}}}}}"), value);
    }
    out
}
