//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AuthService, CatalogService, CollectionService, RecipeService, UserService,
};
use crate::config::Config;
use crate::domain::short_link::{AlphabetError, ShortLinkCodec};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{
    PgCollectionRepository, PgIngredientRepository, PgRecipeRepository,
    PgSubscriptionRepository, PgTagRepository, PgTokenRepository, PgUserRepository,
};
use crate::infrastructure::rendering::TextShoppingListRenderer;

pub type AppAuthService = AuthService<PgTokenRepository, PgUserRepository>;
pub type AppUserService = UserService<PgUserRepository, PgSubscriptionRepository, PgRecipeRepository>;
pub type AppCatalogService = CatalogService<PgTagRepository, PgIngredientRepository>;
pub type AppRecipeService = RecipeService<
    PgRecipeRepository,
    PgCollectionRepository,
    PgSubscriptionRepository,
    PgTagRepository,
    PgIngredientRepository,
>;
pub type AppCollectionService = CollectionService<PgCollectionRepository, PgRecipeRepository>;

/// Settings the HTTP layer needs beyond the services.
#[derive(Clone)]
pub struct AppSettings {
    /// Origin for absolute links, without trailing slash.
    pub public_base_url: String,
    pub page_size: u32,
    pub token_signing_secret: String,
    pub codec: ShortLinkCodec,
}

impl AppSettings {
    /// # Errors
    ///
    /// Returns [`AlphabetError`] if `SHORT_LINK_ALPHABET` is invalid.
    pub fn from_config(config: &Config) -> Result<Self, AlphabetError> {
        Ok(Self {
            public_base_url: config.public_base_url.clone(),
            page_size: config.page_size,
            token_signing_secret: config.token_signing_secret.clone(),
            codec: ShortLinkCodec::new(&config.short_link_alphabet)?,
        })
    }
}

/// Services and settings shared by all handlers.
///
/// Every service is built once here; nothing is looked up globally.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AppAuthService>,
    pub user_service: Arc<AppUserService>,
    pub catalog_service: Arc<AppCatalogService>,
    pub recipe_service: Arc<AppRecipeService>,
    pub collection_service: Arc<AppCollectionService>,
    pub cache: Arc<dyn CacheService>,
    pub pool: Arc<PgPool>,
    pub public_base_url: Arc<str>,
    pub page_size: u32,
}

impl AppState {
    /// Wires repositories into services.
    pub fn new(pool: Arc<PgPool>, cache: Arc<dyn CacheService>, settings: AppSettings) -> Self {
        let users = Arc::new(PgUserRepository::new(pool.clone()));
        let subscriptions = Arc::new(PgSubscriptionRepository::new(pool.clone()));
        let tokens = Arc::new(PgTokenRepository::new(pool.clone()));
        let tags = Arc::new(PgTagRepository::new(pool.clone()));
        let ingredients = Arc::new(PgIngredientRepository::new(pool.clone()));
        let recipes = Arc::new(PgRecipeRepository::new(pool.clone()));
        let collections = Arc::new(PgCollectionRepository::new(pool.clone()));

        let auth_service = Arc::new(AuthService::new(
            tokens,
            users.clone(),
            settings.token_signing_secret,
        ));
        let user_service = Arc::new(UserService::new(
            users,
            subscriptions.clone(),
            recipes.clone(),
        ));
        let catalog_service = Arc::new(CatalogService::new(tags.clone(), ingredients.clone()));
        let recipe_service = Arc::new(RecipeService::new(
            recipes.clone(),
            collections.clone(),
            subscriptions,
            tags,
            ingredients,
            cache.clone(),
            settings.codec,
        ));
        let collection_service = Arc::new(CollectionService::new(
            collections,
            recipes,
            Arc::new(TextShoppingListRenderer::new()),
        ));

        Self {
            auth_service,
            user_service,
            catalog_service,
            recipe_service,
            collection_service,
            cache,
            pool,
            public_base_url: settings.public_base_url.into(),
            page_size: settings.page_size,
        }
    }

    /// Absolute URL for a path on this service.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.public_base_url, path)
    }
}
