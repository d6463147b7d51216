//! Macros for reducing boilerplate when declaring records and presenters

/// Implement [`Record`](crate::core::record::Record) for a `Serialize` type
///
/// Attributes are exported through serde, so `#[serde(rename)]`,
/// `#[serde(skip)]` and friends shape what presenters see.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Serialize)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// impl_record!(User);
///
/// // With a default presenter, so `user.present()` works
/// impl_record!(Admin, default = AdminPresenter);
/// ```
#[macro_export]
macro_rules! impl_record {
    ($type:ty, default = $presenter:ty $(,)?) => {
        impl $crate::core::record::Record for $type {
            fn attributes(&self) -> $crate::core::record::Attributes {
                $crate::core::record::serialize_attributes(self)
            }

            fn default_presenter() -> ::std::option::Option<
                ::std::sync::Arc<$crate::core::definition::PresenterDefinition<Self>>,
            > {
                ::std::option::Option::Some(
                    <$presenter as $crate::core::presenter::PresenterKind>::definition(),
                )
            }
        }
    };
    ($type:ty $(,)?) => {
        impl $crate::core::record::Record for $type {
            fn attributes(&self) -> $crate::core::record::Attributes {
                $crate::core::record::serialize_attributes(self)
            }
        }
    };
}

/// Declare a typed presenter
///
/// Generates a unit struct implementing
/// [`PresenterKind`](crate::core::presenter::PresenterKind). The builder
/// function runs once, on first use; the resulting definition is shared for
/// the life of the process.
///
/// The model type must be `'static`, so a typed presenter cannot wrap a
/// borrowed [`Presentation`](crate::core::factory::Presentation) or
/// [`Presenter`](crate::core::presenter::Presenter). To present a presented
/// sequence again, build a [`PresenterDefinition`](crate::core::definition::PresenterDefinition)
/// at runtime and pass it to [`present_all`](crate::core::collection::present_all).
///
/// # Example
///
/// ```rust,ignore
/// define_presenter! {
///     /// Public profile of a user
///     pub struct UserProfilePresenter for User => |presenter| presenter
///         .computed("full_name", |user| format!("Mx. {}", user.name))
///         .hidden(["email"])
/// }
///
/// let presenter = UserProfilePresenter::make(&user);
/// assert!(presenter.is::<UserProfilePresenter>());
/// ```
#[macro_export]
macro_rules! define_presenter {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident for $model:ty => $build:expr $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        $vis struct $name;

        impl $crate::core::presenter::PresenterKind for $name {
            type Model = $model;

            fn definition() -> ::std::sync::Arc<$crate::core::definition::PresenterDefinition<$model>> {
                static DEFINITION: ::std::sync::OnceLock<
                    ::std::sync::Arc<$crate::core::definition::PresenterDefinition<$model>>,
                > = ::std::sync::OnceLock::new();

                DEFINITION
                    .get_or_init(|| {
                        let build: fn(
                            $crate::core::definition::PresenterDefinitionBuilder<$model>,
                        ) -> $crate::core::definition::PresenterDefinitionBuilder<$model> = $build;
                        let builder = $crate::core::definition::PresenterDefinition::builder(
                            stringify!($name),
                        )
                        .kind::<$name>();
                        ::std::sync::Arc::new(build(builder).build())
                    })
                    .clone()
            }
        }

        impl $name {
            /// Wrap a record with this presenter
            #[allow(dead_code)]
            pub fn make(model: &$model) -> $crate::core::presenter::Presenter<'_, $model> {
                <Self as $crate::core::presenter::PresenterKind>::make(model)
            }

            /// Wrap every record of a sequence with this presenter
            #[allow(dead_code)]
            pub fn collection<'a, I>(models: I) -> ::std::vec::Vec<$crate::core::presenter::Presenter<'a, $model>>
            where
                I: ::std::iter::IntoIterator<Item = &'a $model>,
            {
                <Self as $crate::core::presenter::PresenterKind>::collection(models)
            }
        }
    };
}
