//! Warehouse (gudang) requests

use crate::constants::{requests, tables};

use super::FormRequestDefinition;

/// Numeric dimension fields with their upper bound and display name
const DIMENSIONS: &[(&str, &str, &str)] = &[
    ("total_kapasitas", "999999.99", "Total kapasitas"),
    ("panjang", "9999.99", "Panjang gudang"),
    ("lebar", "9999.99", "Lebar gudang"),
    ("tinggi", "999.99", "Tinggi gudang"),
];

/// Bounds as written in the messages
fn display_bound(field: &str) -> &'static str {
    match field {
        "total_kapasitas" => "999,999.99",
        "tinggi" => "999.99",
        _ => "9,999.99",
    }
}

fn with_attributes(definition: FormRequestDefinition) -> FormRequestDefinition {
    definition
        .attribute("nama_gudang", "nama gudang")
        .attribute("alamat", "alamat")
        .attribute("total_kapasitas", "total kapasitas")
        .attribute("panjang", "panjang")
        .attribute("lebar", "lebar")
        .attribute("tinggi", "tinggi")
        .attribute("aktif", "status aktif")
}

/// Field rules and messages shared by both variants.
///
/// `prefix` is prepended to every chain, `unique_suffix` to the unique rule.
fn build(name: &str, prefix: &str, unique_suffix: &str, required: bool) -> FormRequestDefinition {
    let mut definition = FormRequestDefinition::new(name)
        .field(
            "nama_gudang",
            format!(
                "{prefix}string|max:255|unique:{},nama_gudang{unique_suffix}",
                tables::GUDANG
            ),
        )
        .field("alamat", format!("{prefix}string|max:500"))
        .message("nama_gudang.string", "Nama gudang harus berupa teks.")
        .message("nama_gudang.max", "Nama gudang maksimal 255 karakter.")
        .message("nama_gudang.unique", "Nama gudang sudah digunakan.")
        .message("alamat.string", "Alamat gudang harus berupa teks.")
        .message("alamat.max", "Alamat gudang maksimal 500 karakter.");

    if required {
        definition = definition
            .message("nama_gudang.required", "Nama gudang wajib diisi.")
            .message("alamat.required", "Alamat gudang wajib diisi.");
    }

    for (field, max, label) in DIMENSIONS {
        definition = definition
            .field(*field, format!("{prefix}numeric|min:0|max:{max}"))
            .message(format!("{field}.numeric"), format!("{label} harus berupa angka."))
            .message(format!("{field}.min"), format!("{label} minimal 0."))
            .message(
                format!("{field}.max"),
                format!("{label} maksimal {}.", display_bound(field)),
            );
        if required {
            definition =
                definition.message(format!("{field}.required"), format!("{label} wajib diisi."));
        }
    }

    let aktif = if required { "boolean" } else { "sometimes|boolean" };
    definition = definition.field("aktif", aktif).message(
        "aktif.boolean",
        "Status aktif harus berupa true atau false.",
    );

    with_attributes(definition)
}

/// Register a new warehouse
pub fn store() -> FormRequestDefinition {
    build(requests::GUDANG_STORE, "required|", "", true)
}

/// Partial warehouse update; the name check ignores the edited warehouse
pub fn update() -> FormRequestDefinition {
    build(
        requests::GUDANG_UPDATE,
        "sometimes|",
        ",{exclude_id}",
        false,
    )
}
