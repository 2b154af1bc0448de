use alloc::string::String;

// -----------------------------------------------------------------------------
// impl_reflect_leaf

/// Makes a serde type usable as a leaf value.
///
/// The macro implements [`TypePath`], [`Reflect`] and [`GetTypeMeta`] for the
/// type, with `identifier` as its wire type identifier. The type must be
/// `Serialize + DeserializeOwned + Debug + Send + Sync + 'static`.
///
/// Trailing capabilities are optional:
///
/// - `Hash`: enables [`Reflect::reflect_hash`], which makes the type an
///   efficient map key.
/// - `PartialEq`: enables [`Reflect::reflect_eq`].
///
/// # Examples
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use replay_serde::{JsonCodec, impls::VecList};
///
/// #[derive(Serialize, Deserialize, Debug, PartialEq)]
/// struct Price {
///     cents: u64,
/// }
///
/// replay_serde::impl_reflect_leaf!(Price => "price", PartialEq);
///
/// let codec = JsonCodec::new();
/// codec.register::<Price>();
///
/// let mut list = VecList::new();
/// list.push(Price { cents: 250 });
///
/// let bytes = codec.serialize(&list).unwrap();
/// assert_eq!(bytes, br#"["array-backed-list","price",{"cents":250}]"#);
/// ```
///
/// [`TypePath`]: crate::info::TypePath
/// [`Reflect`]: crate::Reflect
/// [`Reflect::reflect_hash`]: crate::Reflect::reflect_hash
/// [`Reflect::reflect_eq`]: crate::Reflect::reflect_eq
/// [`GetTypeMeta`]: crate::registry::GetTypeMeta
#[macro_export]
macro_rules! impl_reflect_leaf {
    ($ty:ty => $path:literal $(, $cap:ident)* $(,)?) => {
        impl $crate::info::TypePath for $ty {
            #[inline(always)]
            fn type_path() -> &'static str {
                $path
            }
        }

        impl $crate::Reflect for $ty {
            #[inline(always)]
            fn reflect_type_path(&self) -> &'static str {
                $path
            }

            #[inline]
            fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
                $crate::ops::ReflectRef::Leaf(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
                $crate::ops::ReflectMut::Leaf(self)
            }

            #[inline]
            fn into_reflect(
                self: $crate::__macro_exports::Box<Self>,
            ) -> $crate::__macro_exports::Box<dyn $crate::Reflect> {
                self
            }

            fn set(
                &mut self,
                value: $crate::__macro_exports::Box<dyn $crate::Reflect>,
            ) -> $crate::__macro_exports::Result<(), $crate::__macro_exports::Box<dyn $crate::Reflect>>
            {
                *self = <dyn $crate::Reflect>::take::<Self>(value)?;
                $crate::__macro_exports::Result::Ok(())
            }

            fn reflect_debug(
                &self,
                f: &mut $crate::__macro_exports::Formatter<'_>,
            ) -> $crate::__macro_exports::FmtResult {
                $crate::__macro_exports::Debug::fmt(self, f)
            }

            $( $crate::__impl_leaf_capability!($cap); )*
        }

        impl $crate::registry::GetTypeMeta for $ty {
            fn get_type_meta() -> $crate::registry::TypeMeta {
                let mut meta =
                    $crate::registry::TypeMeta::of::<Self>($crate::info::ReflectKind::Leaf);
                meta.insert_trait::<$crate::registry::TypeTraitSerialize>(
                    $crate::registry::FromType::<Self>::from_type(),
                );
                meta.insert_trait::<$crate::registry::TypeTraitDeserialize>(
                    $crate::registry::FromType::<Self>::from_type(),
                );
                meta
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __impl_leaf_capability {
    (Hash) => {
        fn reflect_hash(&self) -> $crate::__macro_exports::Option<u64> {
            let mut hasher = $crate::reflect_hasher();
            <Self as $crate::__macro_exports::Hash>::hash(self, &mut hasher);
            $crate::__macro_exports::Option::Some($crate::__macro_exports::Hasher::finish(&hasher))
        }
    };
    (PartialEq) => {
        fn reflect_eq(&self, other: &dyn $crate::Reflect) -> $crate::__macro_exports::Option<bool> {
            $crate::__macro_exports::Option::Some(
                match <dyn $crate::Reflect>::downcast_ref::<Self>(other) {
                    $crate::__macro_exports::Option::Some(other) => {
                        $crate::__macro_exports::PartialEq::eq(self, other)
                    }
                    $crate::__macro_exports::Option::None => false,
                },
            )
        }
    };
}

// -----------------------------------------------------------------------------
// Built-in leaves

crate::impl_reflect_leaf!(bool => "boolean", Hash, PartialEq);
crate::impl_reflect_leaf!(char => "char", Hash, PartialEq);
crate::impl_reflect_leaf!(String => "string", Hash, PartialEq);

crate::impl_reflect_leaf!(i8 => "byte", Hash, PartialEq);
crate::impl_reflect_leaf!(i16 => "short", Hash, PartialEq);
crate::impl_reflect_leaf!(i32 => "integer", Hash, PartialEq);
crate::impl_reflect_leaf!(i64 => "long", Hash, PartialEq);

crate::impl_reflect_leaf!(u8 => "unsigned-byte", Hash, PartialEq);
crate::impl_reflect_leaf!(u16 => "unsigned-short", Hash, PartialEq);
crate::impl_reflect_leaf!(u32 => "unsigned-integer", Hash, PartialEq);
crate::impl_reflect_leaf!(u64 => "unsigned-long", Hash, PartialEq);

// Floats have no `Hash`, they are still usable as keys through equality.
crate::impl_reflect_leaf!(f32 => "float", PartialEq);
crate::impl_reflect_leaf!(f64 => "double", PartialEq);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::{ReflectKind, TypePath};
    use crate::registry::{GetTypeMeta, TypeTraitDeserialize, TypeTraitSerialize};

    #[test]
    fn identifiers() {
        assert_eq!(<bool as TypePath>::type_path(), "boolean");
        assert_eq!(<i32 as TypePath>::type_path(), "integer");
        assert_eq!(<u64 as TypePath>::type_path(), "unsigned-long");
        assert_eq!(<f64 as TypePath>::type_path(), "double");
        assert_eq!(String::from("x").reflect_type_path(), "string");
    }

    #[test]
    fn capabilities() {
        let a: Box<dyn Reflect> = Box::new(5_i64);
        let b: Box<dyn Reflect> = Box::new(5_i64);
        let c: Box<dyn Reflect> = Box::new(5_i32);

        assert_eq!(a.reflect_eq(&*b), Some(true));
        assert_eq!(a.reflect_eq(&*c), Some(false));
        assert_eq!(a.reflect_hash(), b.reflect_hash());
        assert!(a.reflect_hash().is_some());

        let f: Box<dyn Reflect> = Box::new(1.5_f32);
        assert!(f.reflect_hash().is_none());
        assert_eq!(f.reflect_eq(&1.5_f32), Some(true));
    }

    #[test]
    fn set_checks_type() {
        let mut value = String::from("old");
        assert!(value.set(Box::new(String::from("new"))).is_ok());
        assert_eq!(value, "new");

        let rejected = value.set(Box::new(3_u8)).unwrap_err();
        assert!(rejected.is::<u8>());
        assert_eq!(value, "new");
    }

    #[test]
    fn type_meta() {
        let meta = <u16 as GetTypeMeta>::get_type_meta();
        assert_eq!(meta.type_path(), "unsigned-short");
        assert_eq!(meta.kind(), ReflectKind::Leaf);
        assert!(meta.has_trait::<TypeTraitSerialize>());
        assert!(meta.has_trait::<TypeTraitDeserialize>());
    }
}
