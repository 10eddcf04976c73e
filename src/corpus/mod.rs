mod embed;
mod load;

pub use embed::{
    Embedder, HashedEmbedder, RandomProjection, ReduceParams, Reducer, StoredEmbeddings,
};
pub use load::load_comments;
