//! The admin dashboard's entry point.

use std::sync::Arc;

use catalog::{Order, OrderStatus, Product, ProductForm, badge_count};
use common::{EntityId, EntityKind};
use gateway::{CartQuery, RemoteGateway};
use tokio::sync::Mutex;

use crate::cache::CacheSnapshot;
use crate::config::ConsoleConfig;
use crate::confirm::Confirm;
use crate::controller::MutationController;
use crate::error::Result;
use crate::session::{SessionHandle, ThemeHandle};

/// Dashboard state: the mutation controller plus the "Add New Product" form
/// and the session and theme handles supplied by the host.
pub struct AdminConsole<G: RemoteGateway> {
    controller: MutationController<G>,
    session: SessionHandle,
    theme: ThemeHandle,
    form: Arc<Mutex<ProductForm>>,
}

impl<G: RemoteGateway> AdminConsole<G> {
    pub fn new(
        gateway: G,
        session: SessionHandle,
        theme: ThemeHandle,
        config: ConsoleConfig,
    ) -> Self {
        Self {
            controller: MutationController::new(gateway, config),
            session,
            theme,
            form: Arc::new(Mutex::new(ProductForm::default())),
        }
    }

    pub fn controller(&self) -> &MutationController<G> {
        &self.controller
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn theme(&self) -> &ThemeHandle {
        &self.theme
    }

    /// Fetches products, orders and users.
    pub async fn load(&self) -> Result<()> {
        self.controller.refresh().await
    }

    /// Edits the product form in place.
    pub async fn edit_form(&self, edit: impl FnOnce(&mut ProductForm)) {
        edit(&mut *self.form.lock().await);
    }

    /// Current contents of the product form.
    pub async fn form(&self) -> ProductForm {
        self.form.lock().await.clone()
    }

    /// Submits the product form and clears it once the backend accepts.
    ///
    /// On failure the form keeps what the user typed.
    pub async fn submit_product_form(&self) -> Result<Product> {
        let form = self.form().await;
        let product = self.controller.create_product(&form).await?;
        self.form.lock().await.reset();
        Ok(product)
    }

    pub async fn delete_product<C: Confirm + ?Sized>(
        &self,
        id: &EntityId,
        confirm: &C,
    ) -> Result<()> {
        self.controller
            .delete(EntityKind::Product, id, confirm)
            .await
    }

    pub async fn update_order_status(&self, id: &EntityId, status: OrderStatus) -> Result<Order> {
        self.controller.update_order_status(id, status).await
    }

    /// Copy of the cache for the view projector.
    pub async fn snapshot(&self) -> CacheSnapshot {
        self.controller.cache().snapshot().await
    }

    /// Number shown on the header cart icon; zero when signed out.
    pub async fn cart_badge<Q: CartQuery + ?Sized>(&self, carts: &Q) -> Result<u32> {
        let Some(user) = self.session.user() else {
            return Ok(0);
        };
        let items = carts.cart_items(&user.id).await?;
        Ok(badge_count(&items))
    }
}
