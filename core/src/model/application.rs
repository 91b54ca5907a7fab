use sea_orm::entity::prelude::*;

super::choices! {
	pub enum Ethnicity : "ethnicity" {
		Janjati => "Janjati",
		Dalit => "Dalit",
		Disabled => "Disabled",
		Women => "women",
		Others => "Others",
	}

	pub enum University : "university" {
		Tribhuvan => "Tribhuvan University",
		Kathmandu => "Kathmandu University",
		Pokhara => "Pokhara University",
		Purbanchal => "Purbanchal University",
		MidWest => "Mid-West University",
		FarWestern => "Far-Western University",
	}

	pub enum Program : "program" {
		ComputerScience => "Computer Science",
		Business => "Business",
		Engineering => "Engineering",
		Medicine => "Medicine",
		Law => "Law",
	}

	pub enum PaymentMethod : "payment method" {
		Esewa => "eSewa",
		Khalti => "Khalti",
		BankTransfer => "Bank Transfer",
		PayPal => "PayPal",
	}

	pub enum PaymentStatus : "payment status" {
		Pending => "pending",
		Completed => "completed",
	}
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize, serde::Deserialize)]
#[sea_orm(table_name = "applications")]
#[serde(rename_all = "camelCase")]
pub struct Model {
	#[sea_orm(primary_key)]
	#[serde(rename = "id")]
	pub internal: i64,
	pub name: String,
	pub email: String,
	pub citizenship_number: String,
	pub ethnicity: Ethnicity,
	pub university: University,
	pub program: Program,
	pub payment_method: PaymentMethod,
	pub payment_status: PaymentStatus,
	#[serde(rename = "seeCertificatePath")]
	pub see_certificate: String,
	#[serde(rename = "plusTwoCertificatePath")]
	pub plus_two_certificate: String,
	pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
	/// both stored certificate references, SEE first
	pub fn certificates(&self) -> [&str; 2] {
		[&self.see_certificate, &self.plus_two_certificate]
	}
}
