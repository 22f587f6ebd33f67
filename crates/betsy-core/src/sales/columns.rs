//! Column layout of the delimited sales list.

/// Columns in the order the endpoint writes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    OrderId,
    CustomerName,
    Total,
    Timestamp,
    OrderType,
    Phone,
    Email,
    Address,
    Product,
    Status,
    Business,
    Funnel,
    Quantity,
    Size,
    Color,
    Packaging,
    Customization,
    Comments,
    ProductCost,
    Iva,
    Username,
    ExpectedDate,
    SaleDate,
    Courier,
    SellerEa,
    Province,
    Canton,
    District,
    ShippingCost,
    SellerRa,
    AgreedDate,
    PickupDate,
}

/// Number of columns in a full record.
pub const COLUMN_COUNT: usize = 32;

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Self::OrderId,
        Self::CustomerName,
        Self::Total,
        Self::Timestamp,
        Self::OrderType,
        Self::Phone,
        Self::Email,
        Self::Address,
        Self::Product,
        Self::Status,
        Self::Business,
        Self::Funnel,
        Self::Quantity,
        Self::Size,
        Self::Color,
        Self::Packaging,
        Self::Customization,
        Self::Comments,
        Self::ProductCost,
        Self::Iva,
        Self::Username,
        Self::ExpectedDate,
        Self::SaleDate,
        Self::Courier,
        Self::SellerEa,
        Self::Province,
        Self::Canton,
        Self::District,
        Self::ShippingCost,
        Self::SellerRa,
        Self::AgreedDate,
        Self::PickupDate,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Key of the column in the JSON list envelope.
    pub fn json_key(self) -> &'static str {
        match self {
            Self::OrderId => "orderId",
            Self::CustomerName => "customerName",
            Self::Total => "total",
            Self::Timestamp => "timestamp",
            Self::OrderType => "orderType",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Address => "address",
            Self::Product => "product",
            Self::Status => "status",
            Self::Business => "business",
            Self::Funnel => "funnel",
            Self::Quantity => "quantity",
            Self::Size => "size",
            Self::Color => "color",
            Self::Packaging => "packaging",
            Self::Customization => "customization",
            Self::Comments => "comments",
            Self::ProductCost => "productCost",
            Self::Iva => "iva",
            Self::Username => "username",
            Self::ExpectedDate => "expectedDate",
            Self::SaleDate => "saleDate",
            Self::Courier => "courier",
            Self::SellerEa | Self::SellerRa => "seller",
            Self::Province => "province",
            Self::Canton => "canton",
            Self::District => "district",
            Self::ShippingCost => "shippingCost",
            Self::AgreedDate => "agreedDate",
            Self::PickupDate => "pickupDate",
        }
    }
}

/// Field separator inside a record.
pub const FIELD_SEPARATOR: char = '|';

/// Record terminator.
pub const RECORD_SEPARATOR: char = ';';

/// Read-only view over the fields of one record.
///
/// Columns past the end of the record read as empty.
pub struct Record<'a> {
    fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    pub fn parse(segment: &'a str) -> Self {
        Self::from_fields(segment.split(FIELD_SEPARATOR).map(str::trim).collect())
    }

    /// Wrap fields that are already in column order.
    pub fn from_fields(fields: Vec<&'a str>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, column: Column) -> &'a str {
        self.fields.get(column.index()).copied().unwrap_or("")
    }

    pub fn string(&self, column: Column) -> String {
        self.get(column).to_string()
    }
}
