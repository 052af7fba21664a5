//! Item category (kategori barang) requests

use crate::constants::{requests, tables};

use super::FormRequestDefinition;

/// Register a new item category.
///
/// The category code is checked as submitted; callers upper-case it first
/// when they want lenient input.
pub fn store() -> FormRequestDefinition {
    FormRequestDefinition::new(requests::KATEGORI_BARANG_STORE)
        .field(
            "nama_kategori",
            format!(
                "required|string|max:100|unique:{},nama_kategori",
                tables::KATEGORI_BARANG
            ),
        )
        .field(
            "kode_kategori",
            format!(
                "required|string|max:10|alpha_num|uppercase|unique:{},kode_kategori",
                tables::KATEGORI_BARANG
            ),
        )
        .field("deskripsi", "nullable|string|max:500")
        .field("aktif", "sometimes|boolean")
        .message("nama_kategori.required", "Nama kategori wajib diisi.")
        .message("nama_kategori.string", "Nama kategori harus berupa teks.")
        .message("nama_kategori.max", "Nama kategori maksimal 100 karakter.")
        .message("nama_kategori.unique", "Nama kategori sudah digunakan.")
        .message("kode_kategori.required", "Kode kategori wajib diisi.")
        .message("kode_kategori.string", "Kode kategori harus berupa teks.")
        .message("kode_kategori.max", "Kode kategori maksimal 10 karakter.")
        .message(
            "kode_kategori.alpha_num",
            "Kode kategori hanya boleh mengandung huruf dan angka.",
        )
        .message(
            "kode_kategori.uppercase",
            "Kode kategori harus menggunakan huruf kapital.",
        )
        .message("kode_kategori.unique", "Kode kategori sudah digunakan.")
        .message("deskripsi.string", "Deskripsi harus berupa teks.")
        .message("deskripsi.max", "Deskripsi maksimal 500 karakter.")
        .message("aktif.boolean", "Status aktif harus berupa true atau false.")
        .attribute("nama_kategori", "nama kategori")
        .attribute("kode_kategori", "kode kategori")
        .attribute("deskripsi", "deskripsi")
        .attribute("aktif", "status aktif")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;
    use crate::engine::{Engine, EngineOptions};
    use crate::messages::MessageResolver;
    use crate::models::ValidationContext;
    use crate::rules::RuleRegistry;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_category_code_format() {
        let request = store().build(&RuleRegistry::builtin()).unwrap();
        let store = InMemoryStore::new().with_row(
            "kategori_barang",
            json!({"id": 3, "nama_kategori": "Elektronik", "kode_kategori": "ELK"}),
        );
        let engine = Engine::new(Arc::new(store), EngineOptions::default());

        let record = json!({"nama_kategori": "Perkakas", "kode_kategori": "pk-01"});
        let result = engine
            .validate(
                &request.ruleset,
                record.as_object().unwrap(),
                &ValidationContext::new(),
            )
            .await
            .unwrap();

        let messages = MessageResolver::default().resolve(
            &result,
            &request.messages,
            &request.attributes,
            None,
        );
        assert_eq!(
            messages["kode_kategori"],
            vec![
                "Kode kategori hanya boleh mengandung huruf dan angka.",
                "Kode kategori harus menggunakan huruf kapital.",
            ]
        );

        let record = json!({"nama_kategori": "Elektronik", "kode_kategori": "ELK"});
        let result = engine
            .validate(
                &request.ruleset,
                record.as_object().unwrap(),
                &ValidationContext::new(),
            )
            .await
            .unwrap();
        assert_eq!(result.codes()["kode_kategori"], vec!["unique"]);
        assert_eq!(result.codes()["nama_kategori"], vec!["unique"]);
    }
}
