use crate::catalog::ProductListing;

pub const HEADER: &str = "**New Pokémon TCG products available at BIG W!**\n\n";

/// Stays under Discord's 2000 character cap with some headroom.
pub const MESSAGE_CHUNK_LIMIT: usize = 1900;

pub fn format_listing(listing: &ProductListing) -> String {
    format!(
        "**{}**\nPrice: {}\nStatus: {}\nLink: {}\nSet: {}\n\n",
        listing.title, listing.price, listing.availability, listing.link, listing.set
    )
}

/// The header followed by one block per listing.
pub fn build_blocks(listings: &[ProductListing]) -> Vec<String> {
    std::iter::once(HEADER.to_string())
        .chain(listings.iter().map(format_listing))
        .collect()
}

/// Slices `text` into consecutive pieces of at most `limit` characters.
pub fn split_fixed(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for c in text.chars() {
        if count == limit {
            pieces.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(c);
        count += 1;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Packs whole blocks into chunks of at most `limit` characters.
///
/// A block is only cut when it alone exceeds the limit. Concatenating the
/// result always gives back the concatenated input.
pub fn chunk_blocks<S: AsRef<str>>(blocks: &[S], limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for block in blocks {
        let block = block.as_ref();
        let len = block.chars().count();

        if len > limit {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            chunks.extend(split_fixed(block, limit));
            continue;
        }

        if current_len + len > limit {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push_str(block);
        current_len += len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
