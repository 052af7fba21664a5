//! User account requests

use crate::constants::{capabilities, requests, roles, tables};

use super::FormRequestDefinition;

fn role_rule() -> String {
    format!("in:{}", roles::ALL.join(","))
}

fn with_user_attributes(definition: FormRequestDefinition) -> FormRequestDefinition {
    definition
        .attribute("nama", "nama")
        .attribute("email", "email")
        .attribute("password", "password")
        .attribute("nomor_telepon", "nomor telepon")
        .attribute("role", "role")
        .attribute("aktif", "status aktif")
}

fn with_shared_messages(definition: FormRequestDefinition) -> FormRequestDefinition {
    definition
        .message("nama.required", "Nama harus diisi")
        .message("nama.string", "Nama harus berupa teks")
        .message("nama.max", "Nama maksimal 255 karakter")
        .message("email.required", "Email harus diisi")
        .message("email.email", "Format email tidak valid")
        .message("email.unique", "Email sudah digunakan")
        .message("email.max", "Email maksimal 255 karakter")
        .message("password.min", "Password minimal 8 karakter")
        .message("password.confirmed", "Konfirmasi password tidak cocok")
        .message("nomor_telepon.max", "Nomor telepon maksimal 20 karakter")
        .message("role.required", "Role harus dipilih")
        .message("role.in", "Role yang dipilih tidak valid")
        .message("aktif.boolean", "Status aktif harus berupa boolean")
}

/// Create a user: identity fields are mandatory and the email must be new
pub fn store() -> FormRequestDefinition {
    let definition = FormRequestDefinition::new(requests::USERS_STORE)
        .capability(capabilities::USERS_CREATE)
        .field("nama", vec!["required", "string", "max:255"])
        .field(
            "email",
            vec![
                "required".to_string(),
                "string".to_string(),
                "email".to_string(),
                "max:255".to_string(),
                format!("unique:{},email", tables::USERS),
            ],
        )
        .field("password", vec!["required", "string", "min:8", "confirmed"])
        .field("nomor_telepon", vec!["nullable", "string", "max:20"])
        .field(
            "role",
            vec!["required".to_string(), "string".to_string(), role_rule()],
        )
        .field("aktif", vec!["boolean"])
        .message("password.required", "Password harus diisi");

    with_user_attributes(with_shared_messages(definition))
}

/// Update a user: every field may be omitted and the email check skips
/// the record being edited
pub fn update() -> FormRequestDefinition {
    let definition = FormRequestDefinition::new(requests::USERS_UPDATE)
        .capability(capabilities::USERS_UPDATE)
        .field("nama", vec!["sometimes", "required", "string", "max:255"])
        .field(
            "email",
            vec![
                "sometimes".to_string(),
                "required".to_string(),
                "string".to_string(),
                "email".to_string(),
                "max:255".to_string(),
                format!("unique:{},email,{{exclude_id}}", tables::USERS),
            ],
        )
        .field("password", vec!["nullable", "string", "min:8", "confirmed"])
        .field("nomor_telepon", vec!["nullable", "string", "max:20"])
        .field(
            "role",
            vec![
                "sometimes".to_string(),
                "required".to_string(),
                "string".to_string(),
                role_rule(),
            ],
        )
        .field("aktif", vec!["boolean"]);

    with_user_attributes(with_shared_messages(definition))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Except, RuleAtom, RuleKind, RuleRegistry};

    #[test]
    fn test_store_requires_identity_fields() {
        let request = store().build(&RuleRegistry::builtin()).unwrap();
        for field in ["nama", "email", "password", "role"] {
            let rules = request.ruleset.field(field).unwrap();
            assert!(rules.is_required(), "{field} should be required");
            assert!(!rules.sometimes);
        }
        assert!(request.ruleset.field("nomor_telepon").unwrap().nullable);
        assert_eq!(
            request.messages.get("password", RuleKind::Required),
            Some("Password harus diisi")
        );
    }

    #[test]
    fn test_update_excludes_current_record() {
        let request = update().build(&RuleRegistry::builtin()).unwrap();
        let email = request.ruleset.field("email").unwrap();
        assert!(email.sometimes);

        let unique = email
            .atoms
            .iter()
            .find_map(|atom| match atom {
                RuleAtom::Unique(rule) => Some(rule),
                _ => None,
            })
            .unwrap();
        assert_eq!(unique.except, Except::FromContext);
        assert_eq!(request.messages.get("password", RuleKind::Required), None);
    }

    #[test]
    fn test_email_max_message_matches_across_variants() {
        let registry = RuleRegistry::builtin();
        let created = store().build(&registry).unwrap();
        let updated = update().build(&registry).unwrap();
        assert_eq!(
            created.messages.get("email", RuleKind::MaxLength),
            updated.messages.get("email", RuleKind::MaxLength)
        );
    }
}
