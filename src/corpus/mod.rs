// Corpus loading: raw named text blobs in, tokenized documents out.

pub mod document;
pub mod provider;
