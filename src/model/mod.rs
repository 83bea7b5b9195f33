// Topic modeling: vocabulary, bag-of-words, and an LDA trainer.

pub mod lda;
pub mod traits;
pub mod vocabulary;
