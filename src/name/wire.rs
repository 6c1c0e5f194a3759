// Copyright 2021 Matthew Ingwersen.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you
// may not use this file except in compliance with the License. You may
// obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied. See the License for the specific language governing
// permissions and limitations under the License.

//! Implementation of parsing of compressed on-the-wire names.

use super::{Error, Name, MAX_LABEL_LEN};

/// Parses a compressed name starting at index `start` of `octets`.
/// Pointers are followed. Indices given in pointers are treated as
/// indices of `octets`, so the intention is for an entire DNS message
/// to be passed in `octets`. This is the implementation of
/// [`Name::try_from_compressed`].
///
/// Every pointer must refer to an index *earlier* than the start of the
/// run of labels ("chunk") it terminates. Chunk starts therefore
/// strictly decrease, which bounds the number of pointers followed.
pub fn parse_compressed_name(octets: &[u8], start: usize) -> Result<(Name, usize), Error> {
    let mut labels = Vec::new();
    let mut chunk_start = start;
    let mut index = start;
    let mut wire_len_of_first_chunk = None;

    let wire_len = loop {
        let len = *octets.get(index).ok_or(Error::UnexpectedEom)?;
        if len & 0xc0 == 0xc0 {
            let pointer = parse_pointer(octets, chunk_start, index)?;
            wire_len_of_first_chunk.get_or_insert_with(|| index + 2 - start);
            chunk_start = pointer;
            index = pointer;
        } else if len as usize > MAX_LABEL_LEN {
            return Err(Error::LabelTooLong);
        } else if len == 0 {
            break *wire_len_of_first_chunk.get_or_insert_with(|| index + 1 - start);
        } else {
            let end_of_label = index + 1 + len as usize;
            let label = octets
                .get(index + 1..end_of_label)
                .ok_or(Error::UnexpectedEom)?;
            let label = std::str::from_utf8(label).or(Err(Error::LabelNotUtf8))?;
            labels.push(label.into());
            index = end_of_label;
        }
    };

    Ok((Name::from_labels(labels), wire_len))
}

/// Parses a pointer at `index` in `octets`. This also checks that the
/// pointer refers to an index *earlier* than the start of the chunk it
/// is in (`chunk_start`).
fn parse_pointer(octets: &[u8], chunk_start: usize, index: usize) -> Result<usize, Error> {
    if index + 1 < octets.len() {
        let pointer_bytes = [octets[index], octets[index + 1]];
        let pointer = (u16::from_be_bytes(pointer_bytes) & !0xc000) as usize;
        if pointer >= chunk_start {
            // According to RFC 1035 § 4.1.4, pointers point to a
            // *prior* occurrence of the name. (Importantly, this
            // prevents loops!)
            Err(Error::InvalidPointer)
        } else {
            Ok(pointer)
        }
    } else {
        Err(Error::UnexpectedEom)
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
