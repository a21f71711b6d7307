use bytes::Buf;
use hyper::body::Body;
use pin_project_lite::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

pin_project! {
    /// Collects a response body into one buffer, sized up front when the
    /// content length is known.
    pub struct CollectBodyFuture<B: Body> {
        #[pin]
        body: B,
        buf: Vec<u8>,
    }
}

impl<B> CollectBodyFuture<B>
where
    B: Body,
{
    #[inline]
    #[must_use]
    pub fn with_capacity(body: B, capacity: usize) -> Self {
        Self {
            body,
            buf: Vec::with_capacity(capacity),
        }
    }
}

impl<B> Future for CollectBodyFuture<B>
where
    B: Body,
{
    type Output = Result<Vec<u8>, anyhow::Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slf = self.project();
        loop {
            let Some(next_res) = ready!(slf.body.as_mut().poll_frame(cx)) else {
                return Poll::Ready(Ok(std::mem::take(slf.buf)));
            };
            let frame = match next_res {
                Ok(frame) => frame,
                Err(_e) => {
                    return Poll::Ready(Err(anyhow::anyhow!("failed to poll next body frame")));
                }
            };
            // Trailer frames carry no body data and are skipped.
            if let Ok(mut data) = frame.into_data() {
                while data.has_remaining() {
                    let chunk = data.chunk();
                    slf.buf.extend_from_slice(chunk);
                    let read = chunk.len();
                    data.advance(read);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http_body_util::Full;

    #[tokio::test]
    async fn collects_full_body() {
        let body = Full::new(Bytes::from_static(b"{\"container_id\":\"r1\"}"));
        let collected = CollectBodyFuture::with_capacity(body, 21).await.unwrap();
        assert_eq!(collected, b"{\"container_id\":\"r1\"}");
    }

    #[tokio::test]
    async fn collects_empty_body() {
        let body = Full::new(Bytes::new());
        let collected = CollectBodyFuture::with_capacity(body, 0).await.unwrap();
        assert!(collected.is_empty());
    }
}
