//! Compiled-file metadata encoder.

use crate::encode::config::encode_config;
use crate::schema;
use crate::types::ResourceFile;

/// Encodes the file-level metadata record of a compiled-file unit: resource
/// name, source path, configuration, and exported symbols with their lines.
pub fn encode_compiled_file(file: &ResourceFile) -> schema::CompiledFile {
    schema::CompiledFile {
        resource_name: file.name.clone(),
        source_path: file.source.path.clone(),
        config: encode_config(&file.config),
        exported_symbols: file
            .exported_symbols
            .iter()
            .map(|symbol| schema::CompiledFileSymbol {
                resource_name: symbol.name.clone(),
                source: schema::SourcePosition {
                    line_number: symbol.line,
                    column_number: 0,
                },
            })
            .collect(),
    }
}
