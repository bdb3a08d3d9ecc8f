// Member-chain resolution
//
// Given a dotted identifier chain from a use site and the model of the
// file containing it, walks each intermediate field's declared type
// across import bindings, reparsing target files on demand, until the
// file declaring the last resolvable link is reached. Best effort by
// contract: any dead end returns the model reached so far.

use crate::model::{FileModel, is_array_type, is_simple_type};
use crate::parser::FileParser;
use crate::project::ProjectContext;
use crate::project::resolver::PathResolver;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One identifier of a use-site chain, with its byte span in the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierToken {
    pub name: String,
    pub start_index: usize,
    pub end_index: usize,
}

fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

/// Extract the dotted identifier chain under `cursor` (a byte offset into
/// `line`): every identifier from the start of the dotted expression
/// through the word the cursor is on.
pub fn identifier_chain_at(line: &str, cursor: usize) -> Vec<IdentifierToken> {
    let bytes = line.as_bytes();
    let mut cursor = cursor.min(line.len());
    while cursor > 0 && !line.is_char_boundary(cursor) {
        cursor -= 1;
    }

    // The word under the cursor, extended in both directions.
    let mut word_start = cursor;
    while word_start > 0 && is_identifier_byte(bytes[word_start - 1]) {
        word_start -= 1;
    }
    let mut word_end = cursor;
    while word_end < bytes.len() && is_identifier_byte(bytes[word_end]) {
        word_end += 1;
    }

    // Walk left over the dotted expression feeding into that word.
    let mut chain_start = word_start;
    while chain_start > 0
        && (is_identifier_byte(bytes[chain_start - 1]) || bytes[chain_start - 1] == b'.')
    {
        chain_start -= 1;
    }

    let mut tokens = Vec::new();
    let mut at = chain_start;
    while at < word_end {
        if is_identifier_byte(bytes[at]) {
            let token_start = at;
            while at < word_end && is_identifier_byte(bytes[at]) {
                at += 1;
            }
            tokens.push(IdentifierToken {
                name: line[token_start..at].to_string(),
                start_index: token_start,
                end_index: at,
            });
        } else {
            at += 1;
        }
    }
    tokens
}

pub struct ChainResolver<'a> {
    context: &'a ProjectContext,
}

impl<'a> ChainResolver<'a> {
    pub fn new(context: &'a ProjectContext) -> Self {
        Self { context }
    }

    /// Resolve `chain` starting from `model`, returning the model that
    /// declares the last resolvable link. A chain of one (or none) has
    /// nothing to hop across and returns `model` unchanged.
    pub fn resolve(&self, chain: &[IdentifierToken], model: FileModel) -> FileModel {
        if chain.len() <= 1 {
            return model;
        }
        let first = &chain[0];
        // `this.` prefixes a member chain at the use site but is not
        // itself a field; step over it.
        if first.name == "this" {
            return self.resolve(&chain[1..], model);
        }

        let Some(declared_type) = model
            .find_field(&first.name)
            .and_then(|field| field.declared_type().map(str::to_string))
        else {
            debug!(name = %first.name, "chain link is not a typed field here");
            return model;
        };
        if is_simple_type(&declared_type) || is_array_type(&declared_type) {
            return model;
        }

        let Some(target) = model
            .dependency_binding(&declared_type)
            .and_then(|dependency| dependency.absolute_path.clone())
        else {
            debug!(%declared_type, "no import binding for field type");
            return model;
        };

        let resolver = PathResolver::new(self.context);
        let Some(content) = resolver.read_path(&target) else {
            return model;
        };
        debug!(
            name = %first.name,
            target = %target.display(),
            "following field type into dependency"
        );
        let next = FileParser::new(self.context).parse(&content, &target);
        self.resolve(&chain[1..], next)
    }
}
