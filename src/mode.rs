//! The fixed list of conversion modes the service understands.
//!
//! The mode selector in the form can only ever hold one of these values, so
//! they are an enum rather than free-form strings. The wire identifier
//! (`pdf-to-png`, …) is what travels in the `conversionType` multipart field.

use crate::error::ConvertifyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A conversion the remote service can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConversionMode {
    /// Rasterise a PDF into a PNG image. (default)
    #[default]
    #[serde(rename = "pdf-to-png")]
    PdfToPng,
    /// Extract the text of a DOCX document.
    #[serde(rename = "docx-to-txt")]
    DocxToTxt,
    /// Run OCR over an image.
    #[serde(rename = "img-to-text")]
    ImgToText,
}

/// One entry of the mode selector: wire value plus display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Selector entries in display order. The first entry is the default.
pub const CONVERSION_OPTIONS: [ConversionOption; 3] = [
    ConversionOption {
        value: "pdf-to-png",
        label: "PDF para PNG",
    },
    ConversionOption {
        value: "docx-to-txt",
        label: "DOCX para TXT",
    },
    ConversionOption {
        value: "img-to-text",
        label: "Imagem para Texto (OCR)",
    },
];

impl ConversionMode {
    /// Every mode, in selector order.
    pub const ALL: [ConversionMode; 3] = [
        ConversionMode::PdfToPng,
        ConversionMode::DocxToTxt,
        ConversionMode::ImgToText,
    ];

    /// Identifier sent in the `conversionType` field.
    pub fn as_str(self) -> &'static str {
        self.option().value
    }

    /// Human-readable label shown in the selector.
    pub fn label(self) -> &'static str {
        self.option().label
    }

    /// The selector entry for this mode.
    pub fn option(self) -> ConversionOption {
        CONVERSION_OPTIONS[self as usize]
    }

    /// Extension of the artefact the service produces for this mode.
    pub fn output_extension(self) -> &'static str {
        match self {
            ConversionMode::PdfToPng => "png",
            ConversionMode::DocxToTxt | ConversionMode::ImgToText => "txt",
        }
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversionMode {
    type Err = ConvertifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ConversionMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ConvertifyError::UnknownConversionMode {
                value: s.to_string(),
                expected: CONVERSION_OPTIONS
                    .iter()
                    .map(|o| o.value)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
