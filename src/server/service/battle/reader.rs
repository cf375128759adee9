use std::pin::Pin;

use futures::{
    stream::{TryChunks, TryChunksError},
    StreamExt, TryStream, TryStreamExt,
};

use crate::server::error::Error;

/// Groups a stream of items into fixed size batches.
///
/// Decouples the page size used to read from the database from the unit of work handed to
/// the clustering core. The underlying stream is only polled while a batch is being filled,
/// so nothing beyond the current batch is read until the caller asks for the next one. Every
/// batch holds `batch_size` items except the last, which may be shorter; empty batches are
/// never produced.
pub struct BatchedReader<S: TryStream> {
    inner: Pin<Box<TryChunks<S>>>,
}

impl<S> BatchedReader<S>
where
    S: TryStream<Error = Error>,
{
    /// # Returns
    /// - `Ok(BatchedReader)` - Reader over `source`
    /// - `Err(Error::InternalError)` - `batch_size` is zero
    pub fn new(source: S, batch_size: usize) -> Result<Self, Error> {
        if batch_size == 0 {
            return Err(Error::InternalError(
                "Batched reader requires a batch size of at least 1".to_string(),
            ));
        }

        Ok(Self {
            inner: Box::pin(source.try_chunks(batch_size)),
        })
    }

    /// Reads the next batch, `Ok(None)` once the source is exhausted
    pub async fn next_batch(&mut self) -> Result<Option<Vec<S::Ok>>, Error> {
        match self.inner.next().await {
            None => Ok(None),
            Some(Ok(batch)) => Ok(Some(batch)),
            Some(Err(TryChunksError(_, e))) => Err(e),
        }
    }
}
