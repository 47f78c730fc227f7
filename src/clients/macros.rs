/// Generate client methods with oneshot channel boilerplate and
/// automatic tracing. Channel failures map to the error type's
/// `ActorCommunication` variant - the caller-facing shape of an
/// unreachable store.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $ok:ty as $request:ident::$variant:ident, Error = $error:ty) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$ok, $error> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error>::ActorCommunication("mailbox closed".to_string()))?;

                response.await
                    .map_err(|_| <$error>::ActorCommunication("request dropped".to_string()))?
            }
        }
    };
}

pub(crate) use client_method;
