//! Raw input rows and column name resolution.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

/// An untyped row as handed over by a file-format reader.
pub type RawRow = Map<String, Value>;

/// Canonical record fields a raw column can map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Codigo,
    Nombre,
    Categoria,
    Ubicacion,
    Cantidad,
    Precio,
    ValorTotal,
}

impl Field {
    /// All fields, in record order.
    pub const ALL: [Field; 7] = [
        Field::Codigo,
        Field::Nombre,
        Field::Categoria,
        Field::Ubicacion,
        Field::Cantidad,
        Field::Precio,
        Field::ValorTotal,
    ];

    /// Canonical column name.
    pub fn column(&self) -> &'static str {
        match self {
            Field::Codigo => "codigo",
            Field::Nombre => "nombre",
            Field::Categoria => "categoria",
            Field::Ubicacion => "ubicacion",
            Field::Cantidad => "cantidad",
            Field::Precio => "precio",
            Field::ValorTotal => "valor_total",
        }
    }

    /// Accepted column spellings in priority order (canonical name first).
    pub fn aliases(&self) -> &'static [&'static str] {
        ALIASES.get(self).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

/// Turnover columns, in the order they are tried.
pub const ROTATION_COLUMNS: &[&str] = &[
    "rotacion",
    "rotacion_mensual",
    "ventas_mensuales",
    "salidas_mensuales",
    "demanda_mensual",
];

static ALIASES: Lazy<HashMap<Field, Vec<&'static str>>> = Lazy::new(|| {
    HashMap::from([
        (Field::Codigo, vec!["codigo", "code", "sku", "cod", "id_producto"]),
        (Field::Nombre, vec!["nombre", "name", "producto", "product", "descripcion"]),
        (Field::Categoria, vec!["categoria", "category", "familia"]),
        (Field::Ubicacion, vec!["ubicacion", "location", "almacen", "bodega"]),
        (
            Field::Cantidad,
            vec!["cantidad", "qty", "quantity", "stock", "unidades", "existencias"],
        ),
        (
            Field::Precio,
            vec!["precio", "price", "precio_unitario", "unit_price", "costo_unitario"],
        ),
        (Field::ValorTotal, vec!["valor_total", "total_value", "total", "valor"]),
    ])
});

/// Normalizes a header so spelling variants compare equal.
///
/// Trims, lower-cases, folds Spanish accents and turns spaces and dashes
/// into underscores: `" Código Producto "` becomes `"codigo_producto"`.
pub fn canonical_column(name: &str) -> String {
    name.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'ñ' => 'n',
            ' ' | '-' => '_',
            other => other,
        })
        .collect()
}

/// A raw row indexed by canonical column names.
pub(crate) struct ResolvedRow<'a> {
    columns: HashMap<String, &'a Value>,
}

impl<'a> ResolvedRow<'a> {
    pub(crate) fn new(row: &'a RawRow) -> Self {
        let mut columns = HashMap::with_capacity(row.len());
        for (key, value) in row {
            columns.entry(canonical_column(key)).or_insert(value);
        }
        Self { columns }
    }

    /// Looks a field up through its alias list.
    pub(crate) fn field(&self, field: Field) -> Option<&'a Value> {
        field
            .aliases()
            .iter()
            .find_map(|alias| self.columns.get(*alias).copied())
    }

    /// Looks up an already-canonical column name.
    pub(crate) fn column(&self, name: &str) -> Option<&'a Value> {
        self.columns.get(name).copied()
    }

    pub(crate) fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }
}
