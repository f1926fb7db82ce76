//! name table construction.

use read_fonts::types::NameId;
use write_fonts::tables::name::{Name, NameRecord};

use crate::document::{FontDocument, STYLE_NAME};

pub(crate) fn build_name(document: &FontDocument) -> Name {
    let family = document.family_name.trim();
    let full_name = format!("{family} {STYLE_NAME}");
    let postscript_name = format!("{}-{STYLE_NAME}", document.postscript_family());
    let version = document.version.version_string();
    let unique_id = format!("{};{}", document.version.tag, postscript_name);

    let entries = [
        (NameId::FAMILY_NAME, family.to_string()),
        (NameId::SUBFAMILY_NAME, STYLE_NAME.to_string()),
        (NameId::UNIQUE_ID, unique_id),
        (NameId::FULL_NAME, full_name),
        (NameId::VERSION_STRING, version),
        (NameId::POSTSCRIPT_NAME, postscript_name),
        (NameId::TYPOGRAPHIC_FAMILY_NAME, family.to_string()),
        (NameId::TYPOGRAPHIC_SUBFAMILY_NAME, STYLE_NAME.to_string()),
    ];

    // Windows (platformID=3, encodingID=1, languageID=0x409), already in nameID order
    let records = entries
        .into_iter()
        .map(|(name_id, value)| NameRecord::new(3, 1, 0x409, name_id, value.into()))
        .collect();

    Name::new(records)
}
