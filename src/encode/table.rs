//! Resource table encoder: walks package → type → entry → config value in
//! stored order and owns the private string pool that interns every source
//! path seen along the way. The pool is flattened into the table output last.

use crate::encode::config::encode_config;
use crate::encode::value::{encode_source, encode_value};
use crate::pool::StringPool;
use crate::schema;
use crate::types::{ResourceTable, Visibility};

/// Encodes a whole resource table into its wire record, including the
/// flattened source string pool.
pub fn encode_table(table: &ResourceTable) -> schema::ResourceTable {
    let mut source_pool = StringPool::new();

    let packages = table
        .packages
        .iter()
        .map(|package| schema::Package {
            package_id: package.id.map(u32::from),
            package_name: package.name.clone(),
            types: package
                .types
                .iter()
                .map(|ty| schema::Type {
                    type_id: ty.id.map(u32::from),
                    name: ty.name.clone(),
                    entries: ty
                        .entries
                        .iter()
                        .map(|entry| schema::Entry {
                            entry_id: entry.id.map(u32::from),
                            name: entry.name.clone(),
                            // Always emitted, defaults and all.
                            symbol_status: schema::SymbolStatus {
                                visibility: encode_visibility(entry.symbol_status.visibility),
                                source: Some(encode_source(
                                    &entry.symbol_status.source,
                                    &mut source_pool,
                                )),
                                comment: entry.symbol_status.comment.clone(),
                                allow_new: entry.symbol_status.allow_new,
                            },
                            config_values: entry
                                .values
                                .iter()
                                .map(|config_value| {
                                    let mut config = encode_config(&config_value.config);
                                    config.product = config_value.product.clone();
                                    schema::ConfigValue {
                                        config,
                                        value: encode_value(
                                            &config_value.value,
                                            Some(&mut source_pool),
                                        ),
                                    }
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    schema::ResourceTable {
        packages,
        source_pool: source_pool.flatten(),
    }
}

fn encode_visibility(visibility: Visibility) -> schema::Visibility {
    match visibility {
        Visibility::Private => schema::Visibility::Private,
        Visibility::Public => schema::Visibility::Public,
        Visibility::Undefined => schema::Visibility::Unknown,
    }
}
