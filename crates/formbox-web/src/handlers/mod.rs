pub mod admin;
pub mod ajax;
pub mod assets;
pub mod page;

/// Map any store error into [`crate::Error::Store`].
pub(super) fn store_err<E>(e: E) -> crate::Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  crate::Error::Store(Box::new(e))
}
