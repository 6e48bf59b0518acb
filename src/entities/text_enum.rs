//! 以中文标签落库与序列化的字符串枚举。
//!
//! sea-orm 的 `DeriveActiveEnum` 会把 `string_value` 转成 Rust 标识符，
//! 中文标签无法通过，所以这里手写同一组 trait 实现。

/// 声明一个以文字标签存取的枚举，标签同时用于数据库、JSON 与 Display。
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $variant:ident => $label:tt ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
            sea_orm::EnumIter,
        )]
        $vis enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub fn label(&self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $( $label => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl sea_orm::ActiveEnum for $name {
            type Value = String;

            type ValueVec = Vec<String>;

            fn name() -> sea_orm::sea_query::DynIden {
                sea_orm::sea_query::SeaRc::new(sea_orm::sea_query::Alias::new(stringify!($name)))
                    as sea_orm::sea_query::DynIden
            }

            fn to_value(&self) -> Self::Value {
                self.label().to_owned()
            }

            fn try_from_value(v: &Self::Value) -> Result<Self, sea_orm::DbErr> {
                Self::from_label(v).ok_or_else(|| {
                    sea_orm::DbErr::Type(format!(
                        "unexpected value for {} enum: {v}",
                        stringify!($name)
                    ))
                })
            }

            fn db_type() -> sea_orm::ColumnDef {
                sea_orm::prelude::ColumnTypeTrait::def(sea_orm::ColumnType::Text)
            }
        }

        impl From<$name> for sea_orm::sea_query::Value {
            fn from(v: $name) -> Self {
                v.label().to_owned().into()
            }
        }

        impl sea_orm::TryGetable for $name {
            fn try_get_by<I: sea_orm::ColIdx>(
                res: &sea_orm::QueryResult,
                idx: I,
            ) -> Result<Self, sea_orm::TryGetError> {
                let value = <String as sea_orm::TryGetable>::try_get_by(res, idx)?;
                <Self as sea_orm::ActiveEnum>::try_from_value(&value)
                    .map_err(sea_orm::TryGetError::DbErr)
            }
        }

        impl sea_orm::sea_query::ValueType for $name {
            fn try_from(
                v: sea_orm::sea_query::Value,
            ) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
                let value = <String as sea_orm::sea_query::ValueType>::try_from(v)?;
                <Self as sea_orm::ActiveEnum>::try_from_value(&value)
                    .map_err(|_| sea_orm::sea_query::ValueTypeErr)
            }

            fn type_name() -> String {
                stringify!($name).to_owned()
            }

            fn array_type() -> sea_orm::sea_query::ArrayType {
                <String as sea_orm::sea_query::ValueType>::array_type()
            }

            fn column_type() -> sea_orm::sea_query::ColumnType {
                <Self as sea_orm::ActiveEnum>::db_type()
                    .get_column_type()
                    .to_owned()
                    .into()
            }
        }

        impl sea_orm::sea_query::Nullable for $name {
            fn null() -> sea_orm::sea_query::Value {
                <String as sea_orm::sea_query::Nullable>::null()
            }
        }
    };
}
