//! Item (barang) requests

use crate::constants::{priorities, requests, tables};

use super::FormRequestDefinition;

/// Dimension fields with their bounds, unit and display name
const MEASURES: &[(&str, &str, &str, &str, &str)] = &[
    ("panjang", "0.1", "9999.99", "cm", "Panjang barang"),
    ("lebar", "0.1", "9999.99", "cm", "Lebar barang"),
    ("tinggi", "0.1", "9999.99", "cm", "Tinggi barang"),
    ("berat", "0.01", "99999.99", "kg", "Berat barang"),
];

/// Rules and messages shared by both variants.
///
/// `prefix` goes in front of every mandatory chain; an update also lets
/// the item keep its own code.
fn build(name: &str, prefix: &str, update: bool) -> FormRequestDefinition {
    let kode = if update {
        format!(
            "sometimes|required|string|max:20|unique:{},kode_barang,{{exclude_id}}",
            tables::BARANG
        )
    } else {
        format!("sometimes|string|max:20|unique:{},kode_barang", tables::BARANG)
    };
    let deskripsi = if update {
        "sometimes|nullable|string|max:1000"
    } else {
        "nullable|string|max:1000"
    };

    let mut definition = FormRequestDefinition::new(name)
        .field("kode_barang", kode)
        .field("nama_barang", format!("{prefix}string|max:255"))
        .field(
            "kategori_barang_id",
            format!("{prefix}integer|exists:{},id", tables::KATEGORI_BARANG),
        );

    for (field, min, max, unit, label) in MEASURES {
        definition = definition
            .field(*field, format!("{prefix}numeric|min:{min}|max:{max}"))
            .message(format!("{field}.required"), format!("{label} wajib diisi."))
            .message(format!("{field}.numeric"), format!("{label} harus berupa angka."))
            .message(format!("{field}.min"), format!("{label} minimal {min} {unit}."))
            .message(format!("{field}.max"), format!("{label} maksimal {max} {unit}."));
    }

    if update {
        definition = definition.message("kode_barang.required", "Kode barang wajib diisi.");
    }

    definition
        .field("mudah_pecah", "sometimes|boolean")
        .field(
            "prioritas",
            format!("sometimes|string|in:{}", priorities::ALL.join(",")),
        )
        .field("deskripsi", deskripsi)
        .field("aktif", "sometimes|boolean")
        .message("kode_barang.string", "Kode barang harus berupa teks.")
        .message("kode_barang.max", "Kode barang maksimal 20 karakter.")
        .message("kode_barang.unique", "Kode barang sudah digunakan.")
        .message("nama_barang.required", "Nama barang wajib diisi.")
        .message("nama_barang.string", "Nama barang harus berupa teks.")
        .message("nama_barang.max", "Nama barang maksimal 255 karakter.")
        .message("kategori_barang_id.required", "Kategori barang wajib dipilih.")
        .message("kategori_barang_id.integer", "Kategori barang harus berupa angka.")
        .message(
            "kategori_barang_id.exists",
            "Kategori barang yang dipilih tidak valid.",
        )
        .message(
            "mudah_pecah.boolean",
            "Status mudah pecah harus berupa true atau false.",
        )
        .message("prioritas.string", "Prioritas harus berupa teks.")
        .message(
            "prioritas.in",
            "Prioritas harus salah satu dari: rendah, sedang, tinggi.",
        )
        .message("deskripsi.string", "Deskripsi harus berupa teks.")
        .message("deskripsi.max", "Deskripsi maksimal 1000 karakter.")
        .message("aktif.boolean", "Status aktif harus berupa true atau false.")
        .attribute("kode_barang", "kode barang")
        .attribute("nama_barang", "nama barang")
        .attribute("kategori_barang_id", "kategori barang")
        .attribute("panjang", "panjang")
        .attribute("lebar", "lebar")
        .attribute("tinggi", "tinggi")
        .attribute("berat", "berat")
        .attribute("mudah_pecah", "mudah pecah")
        .attribute("prioritas", "prioritas")
        .attribute("deskripsi", "deskripsi")
        .attribute("aktif", "status aktif")
}

/// Register a new item
pub fn store() -> FormRequestDefinition {
    build(requests::BARANG_STORE, "required|", false)
}

/// Partial item update; the code check ignores the edited item
pub fn update() -> FormRequestDefinition {
    build(requests::BARANG_UPDATE, "sometimes|required|", true)
}
