//! Standalone effect files (EFF V2.0).

use candlekeep_common::{BinaryReader, ResourceCategory};
use candlekeep_effect::{EffectAddressing, EffectVersion, LayoutResolver};
use candlekeep_struct::{Capability, Document, NodeId, RecordKind, StructReader};
use zerocopy::IntoBytes;

use crate::header::SignatureHeader;
use crate::Result;

/// Record kind of the EFF file root.
pub const EFF_FILE: RecordKind = RecordKind::new("EFF file");

const SIGNATURE: [u8; 4] = *b"EFF ";
const VERSION: [u8; 4] = *b"V2.0";

/// Size of an EFF V2.0 file: two signature prefixes and one V2 effect.
pub const EFF_SIZE: usize = 2 * SignatureHeader::SIZE + 0x100;

/// An EFF V2.0 file.
///
/// The file holds one version 2 effect behind a doubled signature prefix.
#[derive(Debug)]
pub struct EffResource {
    doc: Document,
    body: Option<NodeId>,
}

impl EffResource {
    /// Parse an EFF file.
    ///
    /// A body cut short by the end of the file is kept as an opaque
    /// placeholder; [`body`](Self::body) is `None` in that case.
    pub fn parse(data: &[u8], resolver: &LayoutResolver) -> Result<Self> {
        let mut prefix = BinaryReader::new(data);
        let header = SignatureHeader::read(&mut prefix)?;
        header.expect_signature(&SIGNATURE)?;
        header.expect_version(ResourceCategory::Eff, &[VERSION])?;

        let mut doc = Document::new("EFF", EFF_FILE, 0);
        let root = doc.root();
        let mut reader = StructReader::new(&mut doc, root, data, 0);
        reader.text("Signature", 4)?;
        reader.text("Version", 4)?;
        reader.text("Signature 2", 4)?;
        reader.text("Version 2", 4)?;
        let body = resolver.read_into(&mut reader, EffectVersion::V2, "Effect", Capability::Fixed)?;
        let end = reader.finish()?;
        let padding = doc.fill_holes(root, data)?;

        tracing::debug!(end, padding, truncated = body.is_none(), "parsed EFF file");
        Ok(Self { doc, body })
    }

    /// A zeroed EFF file.
    pub fn blank(resolver: &LayoutResolver) -> Result<Self> {
        let header = SignatureHeader::new(SIGNATURE, VERSION);
        let mut data = Vec::with_capacity(EFF_SIZE);
        data.extend_from_slice(header.as_bytes());
        data.extend_from_slice(header.as_bytes());
        data.resize(EFF_SIZE, 0);
        Self::parse(&data, resolver)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// The effect structure.
    pub fn body(&self) -> Option<NodeId> {
        self.body
    }

    /// The effect's opcode.
    pub fn opcode(&self) -> Option<u32> {
        let body = self.doc.get(self.body?)?;
        body.child(0)?.value()?.as_u32()
    }

    /// Role addressing for the effect body.
    pub fn addressing(&self, resolver: &LayoutResolver) -> Result<Option<EffectAddressing>> {
        match self.body {
            Some(body) => Ok(Some(EffectAddressing::build_with(&self.doc, body, resolver)?)),
            None => Ok(None),
        }
    }

    /// Serialize the file.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let root = self.doc.root();
        Ok(self.doc.serialize(root)?)
    }
}
