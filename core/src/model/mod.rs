pub mod application;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownChoice {
	pub kind: &'static str,
	pub value: String,
}

/// fixed value sets, stored and serialized as their literal display strings
macro_rules! choices {
	( $(pub enum $name:ident : $kind:literal { $($variant:ident => $value:literal),+ $(,)? })+ ) => {
		$(
			#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
			#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
			pub enum $name {
				$(
					#[sea_orm(string_value = $value)]
					$variant,
				)+
			}

			impl $name {
				pub const ALL: &'static [$name] = &[$($name::$variant),+];
			}

			impl AsRef<str> for $name {
				fn as_ref(&self) -> &str {
					match self {
						$($name::$variant => $value,)+
					}
				}
			}

			impl TryFrom<&str> for $name {
				type Error = $crate::model::UnknownChoice;

				fn try_from(value: &str) -> Result<Self, Self::Error> {
					match value {
						$($value => Ok($name::$variant),)+
						_ => Err($crate::model::UnknownChoice { kind: $kind, value: value.to_string() }),
					}
				}
			}

			impl serde::Serialize for $name {
				fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
					serializer.serialize_str(self.as_ref())
				}
			}

			impl<'de> serde::Deserialize<'de> for $name {
				fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
					let value = String::deserialize(deserializer)?;
					$name::try_from(value.as_str()).map_err(serde::de::Error::custom)
				}
			}
		)+
	};
}

pub(crate) use choices;
