//! Fixed-size chunking for bulk writes

/// Default chunk size for sink writes
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Split `items` into contiguous chunks of at most `size`
///
/// Order is preserved and nothing is dropped or duplicated; only the last chunk
/// may be shorter. A `size` of 0 is treated as 1.
///
/// # Examples
///
/// ```
/// use docsift_pipeline::batch;
///
/// let items: Vec<u32> = (0..250).collect();
/// let sizes: Vec<usize> = batch(&items, 100).iter().map(|c| c.len()).collect();
/// assert_eq!(sizes, vec![100, 100, 50]);
/// ```
pub fn batch<T>(items: &[T], size: usize) -> Vec<&[T]> {
    items.chunks(size.max(1)).collect()
}
